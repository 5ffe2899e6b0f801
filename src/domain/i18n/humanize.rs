//! Last-resort labels built from translation keys.

/// Turns the final segment of a dotted key into a readable label.
///
/// A space goes before every internal capital letter, `_` and `-` become
/// spaces and the first letter is capitalized:
///
/// ```
/// use aqaargate_web::domain::i18n::humanize_key;
///
/// assert_eq!(humanize_key("cta.futureBuyerInterest"), "Future Buyer Interest");
/// assert_eq!(humanize_key("privacy_policy"), "Privacy policy");
/// ```
pub fn humanize_key(key: &str) -> String {
    let last = key.rsplit('.').next().unwrap_or(key);

    let mut spaced = String::with_capacity(last.len() + 4);
    for (index, c) in last.chars().enumerate() {
        match c {
            '_' | '-' => spaced.push(' '),
            c if c.is_uppercase() && index > 0 => {
                spaced.push(' ');
                spaced.push(c);
            }
            c => spaced.push(c),
        }
    }

    let collapsed = spaced.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut chars = collapsed.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
