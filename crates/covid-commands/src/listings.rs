//! Plain listings of known entities.

/// One name per line, each line terminated.
pub fn listing<S: AsRef<str>>(names: &[S]) -> String {
    names.iter().fold(String::new(), |mut out, name| {
        out.push_str(name.as_ref());
        out.push('\n');
        out
    })
}
