//! Optional `=== name ===` header in front of a model.

/// A model source split into its optional name and its syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSource<'a> {
    name: Option<String>,
    syntax: &'a str,
    offset: usize,
}

impl<'a> ModelSource<'a> {
    /// The model name from the header line, if a non-empty one was given.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The model syntax following the header.
    pub fn syntax(&self) -> &'a str {
        self.syntax
    }

    /// Byte offset of [`ModelSource::syntax`] in the full source.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub(crate) fn into_name(self) -> Option<String> {
        self.name
    }
}

/// Split off a model name header.
///
/// The header is the first line that is neither blank nor a `#` comment, if
/// it starts with at least three `=`. Spaces, tabs and `=` are removed from that line to form the name.
/// Without a header the whole source is syntax.
///
/// # Example
///
/// ```
/// use semtab_parser::split_model_name;
///
/// let model = split_model_name("=== one factor ===\nf =~ x1 + x2");
/// assert_eq!(model.name(), Some("onefactor"));
/// assert_eq!(model.syntax(), "f =~ x1 + x2");
///
/// let model = split_model_name("y ~ x");
/// assert_eq!(model.name(), None);
/// assert_eq!(model.syntax(), "y ~ x");
/// ```
pub fn split_model_name(source: &str) -> ModelSource<'_> {
    let mut line_start = 0;
    for line in source.split_inclusive('\n') {
        let content = line.trim();
        if content.is_empty() || content.starts_with('#') {
            line_start += line.len();
            continue;
        }

        if !content.starts_with("===") {
            break;
        }

        let name: String = content
            .chars()
            .filter(|c| !matches!(c, ' ' | '\t' | '='))
            .collect();
        let offset = line_start + line.len();
        return ModelSource {
            name: (!name.is_empty()).then_some(name),
            syntax: &source[offset..],
            offset,
        };
    }

    ModelSource {
        name: None,
        syntax: source,
        offset: 0,
    }
}
