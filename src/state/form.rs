//! Form editing state types.
//!
//! This module contains the input forms shown inside panels, their fields,
//! and the conversion of entered values into API requests.

use crate::api::{Credentials, NewOrganization, Registration, SupportRequest};
use crate::events::Panel;
use crate::navigation::Overlay;
use std::path::PathBuf;

/// Specifying the different forms.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FormKind {
    Registration,
    Login,
    AddOrganization,
    Support,
    Photo,
}

impl FormKind {
    /// Return the form shown by the given panel, if it has one.
    ///
    pub fn for_panel(panel: Panel) -> Option<FormKind> {
        match panel {
            Panel::Overlay(Overlay::Registration) => Some(FormKind::Registration),
            Panel::Overlay(Overlay::Login) => Some(FormKind::Login),
            Panel::Overlay(Overlay::AddOrganization) => Some(FormKind::AddOrganization),
            Panel::Overlay(Overlay::Support) => Some(FormKind::Support),
            Panel::RenameUser => Some(FormKind::Photo),
            Panel::Overlay(_) => None,
        }
    }

    fn fields(&self) -> Vec<FormField> {
        match self {
            FormKind::Registration => vec![
                FormField::new("Name"),
                FormField::new("Email"),
                FormField::new("Phone"),
                FormField::secret("Password"),
            ],
            FormKind::Login => vec![FormField::new("Email"), FormField::secret("Password")],
            FormKind::AddOrganization => vec![
                FormField::new("Name"),
                FormField::new("Address"),
                FormField::new("Phone"),
            ],
            FormKind::Support => vec![
                FormField::new("Name"),
                FormField::new("Email"),
                FormField::new("Message"),
            ],
            FormKind::Photo => vec![FormField::new("Photo file")],
        }
    }
}

/// Single labelled input.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub label: &'static str,
    pub value: String,
    pub secret: bool,
}

impl FormField {
    fn new(label: &'static str) -> Self {
        FormField {
            label,
            value: String::new(),
            secret: false,
        }
    }

    fn secret(label: &'static str) -> Self {
        FormField {
            secret: true,
            ..FormField::new(label)
        }
    }

    /// Return the value as it should be displayed.
    ///
    pub fn display_value(&self) -> String {
        if self.secret {
            "*".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }
}

/// Request built from a submitted form.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormRequest {
    Registration(Registration),
    Login(Credentials),
    AddOrganization(NewOrganization),
    Support(SupportRequest),
    Photo(PathBuf),
}

/// Houses the values of one form and the focused field.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    kind: FormKind,
    fields: Vec<FormField>,
    focus: usize,
}

impl Form {
    /// Return an empty form of the given kind.
    ///
    pub fn new(kind: FormKind) -> Self {
        Form {
            kind,
            fields: kind.fields(),
            focus: 0,
        }
    }

    pub fn kind(&self) -> FormKind {
        self.kind
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn next_field(&mut self) -> &mut Self {
        self.focus = (self.focus + 1) % self.fields.len();
        self
    }

    pub fn previous_field(&mut self) -> &mut Self {
        self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
        self
    }

    /// Append a character to the focused field.
    ///
    pub fn push_char(&mut self, c: char) -> &mut Self {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.value.push(c);
        }
        self
    }

    /// Remove the last character of the focused field.
    ///
    pub fn pop_char(&mut self) -> &mut Self {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.value.pop();
        }
        self
    }

    fn value(&self, index: usize) -> String {
        self.fields
            .get(index)
            .map(|field| field.value.trim().to_string())
            .unwrap_or_default()
    }

    /// Build the request for the entered values.
    ///
    pub fn request(&self) -> FormRequest {
        match self.kind {
            FormKind::Registration => FormRequest::Registration(Registration {
                name: self.value(0),
                email: self.value(1),
                phone: self.value(2),
                password: self.fields[3].value.clone(),
            }),
            FormKind::Login => FormRequest::Login(Credentials {
                email: self.value(0),
                password: self.fields[1].value.clone(),
            }),
            FormKind::AddOrganization => FormRequest::AddOrganization(NewOrganization {
                name: self.value(0),
                address: self.value(1),
                phone: self.value(2),
            }),
            FormKind::Support => FormRequest::Support(SupportRequest {
                name: self.value(0),
                email: self.value(1),
                message: self.value(2),
            }),
            FormKind::Photo => FormRequest::Photo(PathBuf::from(self.value(0))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_into(form: &mut Form, text: &str) {
        for c in text.chars() {
            form.push_char(c);
        }
    }

    #[test]
    fn test_for_panel() {
        assert_eq!(
            FormKind::for_panel(Panel::Overlay(Overlay::Support)),
            Some(FormKind::Support)
        );
        assert_eq!(FormKind::for_panel(Panel::RenameUser), Some(FormKind::Photo));
        assert_eq!(FormKind::for_panel(Panel::Overlay(Overlay::Contacts)), None);
        assert_eq!(
            FormKind::for_panel(Panel::Overlay(Overlay::OrganizationChoice)),
            None
        );
    }

    #[test]
    fn test_field_navigation_wraps() {
        let mut form = Form::new(FormKind::Login);
        assert_eq!(form.focus(), 0);
        form.next_field();
        assert_eq!(form.focus(), 1);
        form.next_field();
        assert_eq!(form.focus(), 0);
        form.previous_field();
        assert_eq!(form.focus(), 1);
    }

    #[test]
    fn test_typing_goes_to_focused_field() {
        let mut form = Form::new(FormKind::Support);
        type_into(&mut form, "Ada");
        form.next_field();
        type_into(&mut form, "ada@example.com");
        form.pop_char().pop_char().pop_char().pop_char();
        assert_eq!(form.fields()[0].value, "Ada");
        assert_eq!(form.fields()[1].value, "ada@example");
    }

    #[test]
    fn test_secret_display() {
        let mut form = Form::new(FormKind::Login);
        form.next_field();
        type_into(&mut form, "hunter2");
        assert_eq!(form.fields()[1].display_value(), "*******");
        assert_eq!(form.fields()[0].display_value(), "");
    }

    #[test]
    fn test_login_request() {
        let mut form = Form::new(FormKind::Login);
        type_into(&mut form, " ada@example.com ");
        form.next_field();
        type_into(&mut form, " secret ");
        assert_eq!(
            form.request(),
            FormRequest::Login(Credentials {
                email: "ada@example.com".to_string(),
                password: " secret ".to_string(),
            })
        );
    }

    #[test]
    fn test_photo_request() {
        let mut form = Form::new(FormKind::Photo);
        type_into(&mut form, "/tmp/me.jpg");
        assert_eq!(
            form.request(),
            FormRequest::Photo(PathBuf::from("/tmp/me.jpg"))
        );
    }
}
