//! Header directives: `\class`, `\authors` and `\date`.
//!
//! Existing directive lines are thrown away and regenerated on every run,
//! so the header text that survives is the free-form description only.

use regex::Regex;
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::LazyLock;

/// Matches a whole directive line. The name must be followed by a space.
static RE_DIRECTIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\\(?:class|authors|date) .*$").unwrap());

/// Suffix appended to every rendered date.
pub const DATE_SUFFIX: &str = "(last updated)";

/// Remove directive lines from header text, returning the trimmed description.
pub fn strip_directives(header: &str) -> String {
    RE_DIRECTIVE.replace_all(header, "").trim().to_string()
}

/// Base name of `path` with its last extension removed.
///
/// `Widget.cpp` → `Widget`, `parser.tab.cc` → `parser.tab`, `Makefile` → `Makefile`.
/// A leading dot is part of the name: `.config` → `.config`, `.env.local` → `.env`.
pub fn class_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Build the author set: deduplicated, sorted, without empty names.
pub fn collect_authors<I, S>(names: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut authors: BTreeSet<String> = names.into_iter().map(Into::into).collect();
    authors.remove("");
    authors
}

/// Regenerated metadata for one file's header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directives {
    /// `None` for the entry-point file.
    pub class: Option<String>,
    pub authors: BTreeSet<String>,
    /// ISO `YYYY-MM-DD`.
    pub date: String,
}

impl Directives {
    /// Class directive for `path`, or `None` when its name is `entry_point`.
    ///
    /// A path with no usable name also gets none: an empty `\class` would not
    /// be recognized as a directive on the next run.
    pub fn class_for(path: &Path, entry_point: &str) -> Option<String> {
        let name = class_name(path);
        (!name.is_empty() && name != entry_point).then_some(name)
    }

    pub fn authors_line(&self) -> String {
        let names: Vec<&str> = self.authors.iter().map(String::as_str).collect();
        format!("\\authors {}", names.join(", "))
    }

    pub fn date_line(&self) -> String {
        format!("\\date {} {}", self.date, DATE_SUFFIX)
    }

    /// Assemble the full header text around an already-stripped description.
    pub fn assemble(&self, description: &str) -> String {
        let mut text = String::new();
        if let Some(class) = &self.class {
            text.push_str(&format!("\\class {class}\n\n"));
        }
        text.push_str(description);
        text.push_str("\n\n");
        text.push_str(&self.authors_line());
        text.push('\n');
        text.push_str(&self.date_line());
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directives(class: Option<&str>, authors: &[&str], date: &str) -> Directives {
        Directives {
            class: class.map(str::to_string),
            authors: collect_authors(authors.iter().copied()),
            date: date.to_string(),
        }
    }

    #[test]
    fn strip_removes_all_directives() {
        let header = "\\class Widget\n\nDraws things.\n\n\\authors Ada\n\\date 2020-01-01 (last updated)";
        assert_eq!(strip_directives(header), "Draws things.");
    }

    #[test]
    fn strip_keeps_inner_blank_lines() {
        let header = "First.\n\nSecond.\n\\authors Ada";
        assert_eq!(strip_directives(header), "First.\n\nSecond.");
    }

    #[test]
    fn strip_needs_line_start_and_space() {
        let header = "see \\class Foo\n\\classic text\n\\date";
        assert_eq!(strip_directives(header), header);
    }

    #[test]
    fn strip_leaves_other_directives() {
        let header = "\\brief Short.\n\\class Widget";
        assert_eq!(strip_directives(header), "\\brief Short.");
    }

    #[test]
    fn class_name_drops_last_extension() {
        assert_eq!(class_name(Path::new("src/Widget.cpp")), "Widget");
        assert_eq!(class_name(Path::new("parser.tab.cc")), "parser.tab");
        assert_eq!(class_name(Path::new("Makefile")), "Makefile");
    }

    #[test]
    fn class_name_keeps_leading_dot() {
        assert_eq!(class_name(Path::new(".config")), ".config");
        assert_eq!(class_name(Path::new("conf/.bashrc")), ".bashrc");
        assert_eq!(class_name(Path::new(".env.local")), ".env");
        assert_eq!(class_name(Path::new("..")), "");
    }

    #[test]
    fn nameless_path_has_no_class() {
        assert_eq!(Directives::class_for(Path::new(".."), "main"), None);
        assert_eq!(
            Directives::class_for(Path::new(".config"), "main"),
            Some(".config".to_string())
        );
    }

    #[test]
    fn dotfile_class_survives_restrip() {
        let d = directives(Some(".config"), &["Ada"], "2020-01-01");
        let first = d.assemble("Settings.");
        assert_eq!(strip_directives(&first), "Settings.");
    }

    #[test]
    fn entry_point_has_no_class() {
        assert_eq!(Directives::class_for(Path::new("src/main.cpp"), "main"), None);
        assert_eq!(
            Directives::class_for(Path::new("src/main.cpp"), "app"),
            Some("main".to_string())
        );
        assert_eq!(
            Directives::class_for(Path::new("src/mainframe.cpp"), "main"),
            Some("mainframe".to_string())
        );
    }

    #[test]
    fn authors_dedup_sorted_without_empty() {
        let d = directives(None, &["Bob", "Alice", "Bob", ""], "2020-01-01");
        assert_eq!(d.authors_line(), "\\authors Alice, Bob");
    }

    #[test]
    fn authors_sort_by_code_point() {
        let d = directives(None, &["ada", "Zed", "Ada"], "2020-01-01");
        assert_eq!(d.authors_line(), "\\authors Ada, Zed, ada");
    }

    #[test]
    fn date_line_has_suffix() {
        let d = directives(None, &["Ada"], "2024-03-09");
        assert_eq!(d.date_line(), "\\date 2024-03-09 (last updated)");
    }

    #[test]
    fn assemble_with_class() {
        let d = directives(Some("Widget"), &["Ada"], "2020-01-01");
        assert_eq!(
            d.assemble("Draws things."),
            "\\class Widget\n\nDraws things.\n\n\\authors Ada\n\\date 2020-01-01 (last updated)"
        );
    }

    #[test]
    fn assemble_without_class() {
        let d = directives(None, &["Ada"], "2020-01-01");
        assert_eq!(
            d.assemble("Does X."),
            "Does X.\n\n\\authors Ada\n\\date 2020-01-01 (last updated)"
        );
    }

    #[test]
    fn assemble_is_stable_under_restrip() {
        let d = directives(Some("Widget"), &["Ada", "Bob"], "2020-01-01");
        let first = d.assemble("Draws things.");
        assert_eq!(d.assemble(&strip_directives(&first)), first);
    }
}
