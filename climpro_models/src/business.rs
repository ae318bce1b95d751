use serde::Serialize;

/// Public details of the business operating the contact form.
///
/// Rendered into the heading and footer of the notification emails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BusinessDetails {
    pub name: String,
    pub website: String,
    /// Phone number as displayed to customers
    pub phone: String,
    /// Phone number as used in `tel:` links
    pub phone_href: String,
    pub address: String,
    pub vat: String,
}
