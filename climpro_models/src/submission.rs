use nutype::nutype;
use thiserror::Error;

use crate::email_address::EmailAddress;

/// The raw fields of a contact form submission, exactly as received.
///
/// Nothing in here has been sanitized or validated yet. See [`Submission`] for
/// the validated form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionForm {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub postal_code: Option<String>,
    pub service_type: Option<String>,
    pub device_count: Option<String>,
    pub message: Option<String>,
    /// Identifies the page the form was submitted from
    pub page_source: Option<String>,
    /// Hidden field which is only ever filled in by automated senders
    pub honeypot: Option<String>,
    pub consent: bool,
}

impl SubmissionForm {
    /// Returns whether the honeypot field has been filled in.
    pub fn is_bot(&self) -> bool {
        self.honeypot.as_deref().is_some_and(|hp| !hp.is_empty())
    }
}

/// A sanitized submission which satisfies all field requirements.
///
/// Holds at least one usable contact method: an email address with a valid
/// shape or a phone number with at least six characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub full_name: SubmissionFullName,
    pub email: Option<SubmissionText>,
    pub phone: Option<SubmissionText>,
    pub postal_code: SubmissionPostalCode,
    pub service_type: SubmissionServiceType,
    pub device_count: Option<SubmissionText>,
    pub message: SubmissionMessage,
    pub page_source: Option<SubmissionText>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmissionValidationError {
    #[error("Required fields are missing.")]
    MissingRequiredFields,
    #[error("A valid email address or phone number is required.")]
    ContactMethodRequired,
}

impl TryFrom<SubmissionForm> for Submission {
    type Error = SubmissionValidationError;

    fn try_from(form: SubmissionForm) -> Result<Self, Self::Error> {
        let (Ok(full_name), Ok(message), Ok(postal_code), Ok(service_type)) = (
            SubmissionFullName::try_new(form.full_name.unwrap_or_default()),
            SubmissionMessage::try_new(form.message.unwrap_or_default()),
            SubmissionPostalCode::try_new(form.postal_code.unwrap_or_default()),
            SubmissionServiceType::try_new(form.service_type.unwrap_or_default()),
        ) else {
            return Err(SubmissionValidationError::MissingRequiredFields);
        };

        let submission = Self {
            full_name,
            email: optional(form.email),
            phone: optional(form.phone),
            postal_code,
            service_type,
            device_count: optional(form.device_count),
            message,
            page_source: optional(form.page_source),
        };

        if submission.valid_email().is_none() && submission.valid_phone().is_none() {
            return Err(SubmissionValidationError::ContactMethodRequired);
        }

        Ok(submission)
    }
}

fn optional(value: Option<String>) -> Option<SubmissionText> {
    value.and_then(|value| SubmissionText::try_new(value).ok())
}

impl Submission {
    /// The email address of the submitter, if it has a valid shape.
    pub fn valid_email(&self) -> Option<EmailAddress> {
        self.email
            .as_ref()
            .and_then(|email| EmailAddress::try_new(email.as_str()).ok())
    }

    /// The phone number of the submitter, if it is long enough to be usable.
    pub fn valid_phone(&self) -> Option<PhoneNumber> {
        self.phone
            .as_ref()
            .and_then(|phone| PhoneNumber::try_new(phone.as_str()).ok())
    }

    /// The first whitespace separated token of the full name.
    pub fn first_name(&self) -> &str {
        self.full_name.split_whitespace().next().unwrap_or_default()
    }

    pub fn category(&self) -> ServiceCategory {
        ServiceCategory::classify(&self.service_type)
    }
}

#[nutype(
    sanitize(with = |s: String| crate::sanitize(&s)),
    validate(not_empty),
    derive(Debug, Clone, PartialEq, Eq, Deref, TryFrom, Display)
)]
pub struct SubmissionFullName(String);

#[nutype(
    sanitize(with = |s: String| crate::sanitize(&s)),
    validate(not_empty),
    derive(Debug, Clone, PartialEq, Eq, Deref, TryFrom, Display)
)]
pub struct SubmissionPostalCode(String);

#[nutype(
    sanitize(with = |s: String| crate::sanitize(&s)),
    validate(not_empty),
    derive(Debug, Clone, PartialEq, Eq, Deref, TryFrom, Display)
)]
pub struct SubmissionServiceType(String);

#[nutype(
    sanitize(with = |s: String| crate::sanitize(&s)),
    validate(not_empty),
    derive(Debug, Clone, PartialEq, Eq, Deref, TryFrom, Display)
)]
pub struct SubmissionMessage(String);

/// Sanitized value of an optional free-text field.
#[nutype(
    sanitize(with = |s: String| crate::sanitize(&s)),
    validate(not_empty),
    derive(Debug, Clone, PartialEq, Eq, Deref, TryFrom, Display)
)]
pub struct SubmissionText(String);

#[nutype(
    sanitize(with = |s: String| crate::sanitize(&s)),
    validate(len_char_min = 6),
    derive(Debug, Clone, PartialEq, Eq, Deref, TryFrom, Display)
)]
pub struct PhoneNumber(String);

/// The kind of service a submission asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceCategory {
    Maintenance,
    Repair,
    Installation,
    Quote,
}

impl ServiceCategory {
    /// Keywords looked up in the lowercased service type, in order of precedence.
    const KEYWORDS: [(&'static str, ServiceCategory); 3] = [
        ("entretien", ServiceCategory::Maintenance),
        ("dépannage", ServiceCategory::Repair),
        ("installation", ServiceCategory::Installation),
    ];

    /// Classifies a free-text service type. The first matching keyword wins,
    /// anything without a known keyword is a quote request.
    pub fn classify(service_type: &str) -> Self {
        let service_type = service_type.to_lowercase();
        Self::KEYWORDS
            .iter()
            .find(|(keyword, _)| service_type.contains(keyword))
            .map(|&(_, category)| category)
            .unwrap_or(Self::Quote)
    }

    /// The label used as prefix of the notification subjects.
    pub fn subject_prefix(self) -> &'static str {
        match self {
            Self::Maintenance => "Demande d’entretien",
            Self::Repair => "Demande de dépannage",
            Self::Installation => "Demande d’info installation",
            Self::Quote => "Demande de devis gratuit",
        }
    }
}

#[cfg(test)]
mod tests {
    use climpro_utils::assert_matches;
    use pretty_assertions::assert_eq;

    use super::*;

    fn form() -> SubmissionForm {
        SubmissionForm {
            full_name: Some("Jean Dupont".into()),
            email: Some("jean@ex.com".into()),
            phone: Some("".into()),
            postal_code: Some("1000".into()),
            service_type: Some("Dépannage urgent".into()),
            device_count: Some("2".into()),
            message: Some("Panne clim".into()),
            page_source: None,
            honeypot: Some("".into()),
            consent: true,
        }
    }

    #[test]
    fn honeypot() {
        assert!(!form().is_bot());
        assert!(!SubmissionForm {
            honeypot: None,
            ..form()
        }
        .is_bot());
        assert!(SubmissionForm {
            honeypot: Some("spam".into()),
            ..form()
        }
        .is_bot());
        assert!(SubmissionForm {
            honeypot: Some(" ".into()),
            ..form()
        }
        .is_bot());
    }

    #[test]
    fn valid_submission() {
        // Act
        let result = Submission::try_from(SubmissionForm {
            full_name: Some("  <b>Jean</b> Dupont ".into()),
            page_source: Some("   ".into()),
            ..form()
        });

        // Assert
        let submission = result.unwrap();
        assert_eq!(submission.full_name.as_str(), "bJean/b Dupont");
        assert_eq!(submission.phone, None);
        assert_eq!(submission.page_source, None);
        assert_eq!(submission.device_count.as_deref().map(String::as_str), Some("2"));
        assert_eq!(
            submission.valid_email(),
            Some(EmailAddress::try_new("jean@ex.com").unwrap())
        );
        assert_eq!(submission.category(), ServiceCategory::Repair);
        assert_eq!(submission.first_name(), "bJean/b");
    }

    #[test]
    fn missing_required_fields() {
        let cases: [fn(&mut SubmissionForm); 8] = [
            |f| f.full_name = None,
            |f| f.full_name = Some("  ".into()),
            |f| f.message = None,
            |f| f.message = Some("<>".into()),
            |f| f.postal_code = None,
            |f| f.postal_code = Some("".into()),
            |f| f.service_type = None,
            |f| f.service_type = Some(" < > ".into()),
        ];

        for modify in cases {
            let mut form = form();
            modify(&mut form);
            assert_eq!(
                Submission::try_from(form),
                Err(SubmissionValidationError::MissingRequiredFields)
            );
        }
    }

    #[test]
    fn missing_required_fields_before_contact_method() {
        let result = Submission::try_from(SubmissionForm {
            full_name: None,
            email: None,
            phone: None,
            ..form()
        });

        assert_eq!(
            result,
            Err(SubmissionValidationError::MissingRequiredFields)
        );
    }

    #[test]
    fn contact_method() {
        for (email, phone, ok) in [
            (Some("jean@ex.com"), None, true),
            (None, Some("123456"), true),
            (Some("pas un email"), Some("02 428 40 35"), true),
            (Some("jean@ex.com"), Some("123"), true),
            (None, Some("12345"), false),
            (Some(""), Some(" 12345 "), false),
            (Some("jean@ex"), Some("<123>45"), false),
            (None, None, false),
        ] {
            let result = Submission::try_from(SubmissionForm {
                email: email.map(Into::into),
                phone: phone.map(Into::into),
                ..form()
            });

            if ok {
                assert_matches!(result, Ok(_));
            } else {
                assert_eq!(
                    result,
                    Err(SubmissionValidationError::ContactMethodRequired),
                    "email: {email:?}, phone: {phone:?}"
                );
            }
        }
    }

    #[test]
    fn invalid_email_is_kept_but_not_valid() {
        let submission = Submission::try_from(SubmissionForm {
            email: Some("jean@ex".into()),
            phone: Some("0470123456".into()),
            ..form()
        })
        .unwrap();

        assert_eq!(submission.email.as_deref().map(String::as_str), Some("jean@ex"));
        assert_eq!(submission.valid_email(), None);
        assert_eq!(
            submission.valid_phone().as_deref().map(String::as_str),
            Some("0470123456")
        );
    }

    #[test]
    fn first_name() {
        for (full_name, expected) in [
            ("Jean Dupont", "Jean"),
            ("Marie", "Marie"),
            ("  Anne-Sophie   de Wilde ", "Anne-Sophie"),
        ] {
            let submission = Submission::try_from(SubmissionForm {
                full_name: Some(full_name.into()),
                ..form()
            })
            .unwrap();
            assert_eq!(submission.first_name(), expected);
        }
    }

    #[test]
    fn classify() {
        for (service_type, expected) in [
            ("Entretien annuel", ServiceCategory::Maintenance),
            ("Entretien + Installation", ServiceCategory::Maintenance),
            ("Dépannage et entretien", ServiceCategory::Maintenance),
            ("Dépannage urgent", ServiceCategory::Repair),
            ("DÉPANNAGE", ServiceCategory::Repair),
            ("Installation climatisation", ServiceCategory::Installation),
            ("dépannage après installation", ServiceCategory::Repair),
            ("Devis", ServiceCategory::Quote),
            ("Pompe à chaleur", ServiceCategory::Quote),
        ] {
            assert_eq!(
                ServiceCategory::classify(service_type),
                expected,
                "service type: {service_type:?}"
            );
        }
    }

    #[test]
    fn subject_prefix() {
        assert_eq!(
            ServiceCategory::Repair.subject_prefix(),
            "Demande de dépannage"
        );
        assert_eq!(
            ServiceCategory::Quote.subject_prefix(),
            "Demande de devis gratuit"
        );
    }
}
