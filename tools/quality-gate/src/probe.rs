/// True when `name` resolves to an executable via the system search path
/// (or, for names containing a path separator, relative to the working
/// directory). Resolution only; the tool is never run, so probing has no
/// side effects. Not-found and found-but-not-executable both come back
/// false.
pub fn tool_available(name: &str) -> bool {
    which::which(name).is_ok()
}
