use std::sync::LazyLock;

use climpro_models::{
    business::BusinessDetails,
    email_address::EmailAddressWithName,
    submission::{Submission, SubmissionForm},
};

pub mod submission;

pub use submission::{FORM_JEAN, FORM_MARIE, SUBMISSION_JEAN, SUBMISSION_MARIE};

pub static BUSINESS: LazyLock<BusinessDetails> = LazyLock::new(|| BusinessDetails {
    name: "Climpro".into(),
    website: "Climpro.be".into(),
    phone: "02 428 40 35".into(),
    phone_href: "024284035".into(),
    address: "133 Rue des Colombophiles, 1070 Bruxelles".into(),
    vat: "BE0564.697.277".into(),
});

pub static SENDER: LazyLock<EmailAddressWithName> =
    LazyLock::new(|| "Climpro <info@climpro.be>".parse().unwrap());

pub static RECIPIENTS: LazyLock<Vec<EmailAddressWithName>> =
    LazyLock::new(|| vec!["info@climpro.be".parse().unwrap()]);

fn submission(form: &SubmissionForm) -> Submission {
    form.clone().try_into().unwrap()
}
