//! Single-line text forms for login, registration and the news editor

use feedsite_core::api::{NewsDraft, NewsItem, RegisterRequest};

#[derive(Debug, Clone)]
pub struct FormField {
    pub label: &'static str,
    pub value: String,
    /// Rendered as bullets
    pub masked: bool,
}

impl FormField {
    fn text(label: &'static str) -> Self {
        Self {
            label,
            value: String::new(),
            masked: false,
        }
    }

    fn secret(label: &'static str) -> Self {
        Self {
            label,
            value: String::new(),
            masked: true,
        }
    }

    pub fn display_value(&self) -> String {
        if self.masked {
            "•".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }
}

#[derive(Debug, Clone)]
pub struct Form {
    pub title: &'static str,
    pub fields: Vec<FormField>,
    pub focused: usize,
    pub error: Option<String>,
    /// A submit is in flight; further submits are ignored
    pub submitting: bool,
}

impl Form {
    fn new(title: &'static str, fields: Vec<FormField>) -> Self {
        Self {
            title,
            fields,
            focused: 0,
            error: None,
            submitting: false,
        }
    }

    pub fn login() -> Self {
        Self::new("Login", vec![FormField::text("Username"), FormField::secret("Password")])
    }

    pub fn register() -> Self {
        Self::new(
            "Register",
            vec![
                FormField::text("Username"),
                FormField::text("Email"),
                FormField::secret("Password"),
                FormField::secret("Confirm password"),
            ],
        )
    }

    pub fn news_editor() -> Self {
        Self::new(
            "New item",
            vec![
                FormField::text("Title"),
                FormField::text("Description"),
                FormField::text("Image URL"),
            ],
        )
    }

    /// Editor prefilled from an existing item
    pub fn news_editor_for(item: &NewsItem) -> Self {
        let mut form = Self::news_editor();
        form.title = "Edit item";
        form.fields[0].value = item.title.clone();
        form.fields[1].value = item.description.clone();
        form.fields[2].value = item.image_url.clone().unwrap_or_default();
        form
    }

    pub fn value(&self, index: usize) -> &str {
        self.fields.get(index).map(|f| f.value.as_str()).unwrap_or("")
    }

    pub fn input_char(&mut self, c: char) {
        if let Some(field) = self.fields.get_mut(self.focused) {
            field.value.push(c);
        }
        self.error = None;
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focused) {
            field.value.pop();
        }
    }

    pub fn next_field(&mut self) {
        if !self.fields.is_empty() {
            self.focused = (self.focused + 1) % self.fields.len();
        }
    }

    pub fn prev_field(&mut self) {
        if !self.fields.is_empty() {
            self.focused = (self.focused + self.fields.len() - 1) % self.fields.len();
        }
    }

    /// Drop secrets after a submit attempt
    pub fn clear_secrets(&mut self) {
        for field in self.fields.iter_mut().filter(|f| f.masked) {
            field.value.clear();
        }
    }

    /// Login fields, or a message naming the first missing one
    pub fn credentials(&self) -> Result<(String, String), String> {
        let username = self.value(0).trim();
        if username.is_empty() {
            return Err("Please enter your username".to_string());
        }
        if self.value(1).is_empty() {
            return Err("Please enter your password".to_string());
        }
        Ok((username.to_string(), self.value(1).to_string()))
    }

    /// Registration request after the confirmation check
    pub fn registration(&self) -> Result<RegisterRequest, String> {
        if self.value(2) != self.value(3) {
            return Err("Passwords do not match".to_string());
        }
        let request = RegisterRequest {
            username: self.value(0).to_string(),
            email: self.value(1).to_string(),
            password: self.value(2).to_string(),
        };
        request.validated().map_err(|e| e.user_message())
    }

    /// Editor contents as a validated draft
    pub fn draft(&self) -> Result<NewsDraft, String> {
        let image = self.value(2).trim();
        let draft = NewsDraft::new(
            self.value(0),
            self.value(1),
            (!image.is_empty()).then(|| image.to_string()),
        );
        draft.validated().map_err(|e| e.user_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill(form: &mut Form, values: &[&str]) {
        for (i, value) in values.iter().enumerate() {
            form.fields[i].value = value.to_string();
        }
    }

    #[test]
    fn test_typing_and_focus() {
        let mut form = Form::login();
        for c in "alice".chars() {
            form.input_char(c);
        }
        form.next_field();
        form.input_char('x');
        form.backspace();
        form.input_char('p');
        assert_eq!(form.value(0), "alice");
        assert_eq!(form.value(1), "p");
        assert_eq!(form.fields[1].display_value(), "•");

        form.next_field();
        assert_eq!(form.focused, 0);
        form.prev_field();
        assert_eq!(form.focused, 1);
    }

    #[test]
    fn test_credentials_require_both_fields() {
        let mut form = Form::login();
        assert!(form.credentials().is_err());
        fill(&mut form, &["  alice ", "secret1"]);
        assert_eq!(form.credentials(), Ok(("alice".to_string(), "secret1".to_string())));
        form.clear_secrets();
        assert_eq!(form.value(1), "");
        assert_eq!(form.value(0), "  alice ");
    }

    #[test]
    fn test_registration_checks_confirmation() {
        let mut form = Form::register();
        fill(&mut form, &["alice", "alice@example.com", "secret1", "secret2"]);
        assert_eq!(form.registration().unwrap_err(), "Passwords do not match");

        fill(&mut form, &["alice", "alice@example.com", "secret1", "secret1"]);
        assert_eq!(form.registration().unwrap().username, "alice");
    }

    #[test]
    fn test_draft_treats_blank_image_as_none() {
        let mut form = Form::news_editor();
        fill(&mut form, &["Title", "Body", "   "]);
        assert_eq!(form.draft().unwrap().image_url, None);

        fill(&mut form, &["", "Body", ""]);
        assert!(form.draft().is_err());
    }
}
