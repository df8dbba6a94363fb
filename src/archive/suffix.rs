use std::path::Path;

/// Dot-separated extensions of a file name, in order (`a.tar.gz` gives `[".tar", ".gz"]`).
///
/// Leading dots belong to the name, not to an extension, and a name that ends
/// with a dot has no extensions at all.
pub fn suffixes(path: &Path) -> Vec<String> {
    let Some(name) = path.file_name().map(|name| name.to_string_lossy()) else {
        return Vec::new();
    };
    if name.ends_with('.') {
        return Vec::new();
    }

    name.trim_start_matches('.')
        .split('.')
        .skip(1)
        .map(|ext| format!(".{ext}"))
        .collect()
}

/// File name with its final extension removed.
pub fn stem(path: &Path) -> Option<String> {
    path.file_stem().map(|stem| stem.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(name: &str) -> Vec<String> {
        suffixes(Path::new(name))
    }

    #[test]
    fn splits_compound_extensions() {
        assert_eq!(chain("data/foo.tar.gz"), vec![".tar", ".gz"]);
        assert_eq!(chain("foo.zip"), vec![".zip"]);
        assert_eq!(chain("v1.2.corpus.tgz"), vec![".2", ".corpus", ".tgz"]);
    }

    #[test]
    fn edge_names_have_no_extensions() {
        assert!(chain("README").is_empty());
        assert!(chain(".bashrc").is_empty());
        assert!(chain("foo.").is_empty());
        assert!(chain("/").is_empty());
    }

    #[test]
    fn stem_drops_only_last_extension() {
        assert_eq!(stem(Path::new("dir/foo.gz")).as_deref(), Some("foo"));
        assert_eq!(stem(Path::new("foo.txt.gz")).as_deref(), Some("foo.txt"));
    }
}
