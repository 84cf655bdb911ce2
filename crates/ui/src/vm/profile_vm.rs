use juggle_core::model::{LearningStyle, ProfileUpdate, User};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub name: String,
    pub email: String,
    pub learning_style: String,
    pub avatar: String,
}

impl ProfileForm {
    #[must_use]
    pub fn from_user(user: &User) -> Self {
        Self {
            name: user.name().to_string(),
            email: user.email().to_string(),
            learning_style: user.learning_style().as_str().to_string(),
            avatar: user.avatar().unwrap_or_default().to_string(),
        }
    }

    /// Only fields that differ from `user` are sent.
    #[must_use]
    pub fn changes_from(&self, user: &User) -> ProfileUpdate {
        let changed = |value: &str, current: &str| (value.trim() != current).then(|| value.to_string());
        ProfileUpdate {
            name: changed(&self.name, user.name()),
            email: changed(&self.email, user.email()),
            learning_style: self
                .learning_style
                .parse::<LearningStyle>()
                .ok()
                .filter(|style| *style != user.learning_style()),
            avatar: changed(&self.avatar, user.avatar().unwrap_or_default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use juggle_core::model::UserId;

    fn user() -> User {
        User::new(
            UserId::new("user-123"),
            "Test User",
            "test@example.com",
            None,
            LearningStyle::Reflector,
            7,
        )
        .unwrap()
    }

    #[test]
    fn unchanged_form_sends_nothing() {
        let user = user();
        let form = ProfileForm::from_user(&user);
        assert_eq!(form.changes_from(&user), ProfileUpdate::default());
    }

    #[test]
    fn edited_fields_are_sent() {
        let user = user();
        let form = ProfileForm {
            name: "Ada".into(),
            learning_style: "Theorist".into(),
            ..ProfileForm::from_user(&user)
        };
        let update = form.changes_from(&user);
        assert_eq!(update.name.as_deref(), Some("Ada"));
        assert_eq!(update.learning_style, Some(LearningStyle::Theorist));
        assert_eq!(update.email, None);
    }
}
