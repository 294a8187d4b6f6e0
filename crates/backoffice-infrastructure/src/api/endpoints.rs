//! Backend endpoint paths, relative to the configured base URL.

pub const LOGIN: &str = "/user/login";
pub const USER_INFO: &str = "/user/getuser";
/// Reserved. The backend exposes it, but logout only clears client state
/// and never calls it.
pub const LOGOUT: &str = "/auth/logout";
pub const CALL_PROC: &str = "/dso/callproc";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_are_absolute_and_distinct() {
        let paths = [LOGIN, USER_INFO, LOGOUT, CALL_PROC];
        for (i, path) in paths.iter().enumerate() {
            assert!(path.starts_with('/'), "{} is not absolute", path);
            assert!(!paths[i + 1..].contains(path), "{} is declared twice", path);
        }
    }
}
