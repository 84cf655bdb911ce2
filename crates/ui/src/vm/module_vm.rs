use juggle_core::model::{Module, ModuleStatus};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleCardVm {
    pub id: String,
    pub order_label: String,
    pub name: String,
    pub description: String,
    pub prop_label: &'static str,
    pub tech_theme: String,
    pub status_label: &'static str,
    pub status_class: &'static str,
    pub progress: u8,
    pub progress_label: String,
    pub locked: bool,
    pub action_label: &'static str,
}

impl From<&Module> for ModuleCardVm {
    fn from(module: &Module) -> Self {
        let status = module.status();
        Self {
            id: module.id().as_str().to_string(),
            order_label: format!("Module {}", module.order()),
            name: module.name().to_string(),
            description: module.description().to_string(),
            prop_label: module.prop().label(),
            tech_theme: module.tech_theme().to_string(),
            status_label: status.label(),
            status_class: status_class(status),
            progress: module.progress(),
            progress_label: format!("{}%", module.progress()),
            locked: !module.is_unlocked(),
            action_label: action_label(module),
        }
    }
}

#[must_use]
pub fn status_class(status: ModuleStatus) -> &'static str {
    match status {
        ModuleStatus::Locked => "status status--locked",
        ModuleStatus::InProgress => "status status--progress",
        ModuleStatus::Completed => "status status--completed",
    }
}

fn action_label(module: &Module) -> &'static str {
    match module.status() {
        ModuleStatus::Locked => "Locked",
        ModuleStatus::Completed => "Review",
        ModuleStatus::InProgress if module.progress() == 0 => "Start",
        ModuleStatus::InProgress => "Continue",
    }
}

#[must_use]
pub fn map_module_cards(modules: &[Module]) -> Vec<ModuleCardVm> {
    modules.iter().map(ModuleCardVm::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use juggle_core::model::{JugglingProp, ModuleId, ModuleInfo, TimeEstimate};

    fn module(status: ModuleStatus, progress: u8) -> Module {
        let info = ModuleInfo {
            id: ModuleId::new("module-3"),
            order: 3,
            name: "Flower Stick - Event-Driven Design".into(),
            description: "Rhythm and events".into(),
            prop: JugglingProp::FlowerStick,
            tech_theme: "Event-driven".into(),
            technologies: Vec::new(),
            tie_in: None,
            reflection_prompt: None,
            time_estimate: TimeEstimate::default(),
        };
        Module::new(info, status, progress).unwrap()
    }

    #[test]
    fn card_labels_follow_status() {
        let locked = ModuleCardVm::from(&module(ModuleStatus::Locked, 0));
        assert!(locked.locked);
        assert_eq!(locked.action_label, "Locked");
        assert_eq!(locked.prop_label, "Flower Stick");

        let fresh = ModuleCardVm::from(&module(ModuleStatus::InProgress, 0));
        assert_eq!(fresh.action_label, "Start");

        let started = ModuleCardVm::from(&module(ModuleStatus::InProgress, 40));
        assert_eq!(started.action_label, "Continue");
        assert_eq!(started.progress_label, "40%");
        assert_eq!(started.order_label, "Module 3");

        let done = ModuleCardVm::from(&module(ModuleStatus::Completed, 100));
        assert_eq!(done.status_class, "status status--completed");
        assert_eq!(done.action_label, "Review");
    }
}
