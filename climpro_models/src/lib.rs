pub mod business;
pub mod email_address;
pub mod submission;

/// Removes the characters `<` and `>` and trims surrounding whitespace.
///
/// Applied to every free-text field of a submission before it is used, so
/// that user input can never inject markup into the rendered notifications.
pub fn sanitize(value: &str) -> String {
    value.replace(['<', '>'], "").trim().into()
}
