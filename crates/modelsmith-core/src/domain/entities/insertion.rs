//! Insertion points in generated text files.
//!
//! Skeleton files carry sentinel comment lines (markers). An
//! [`InsertionPoint`] names one marker and knows how to produce the line
//! that replaces it; a [`TextPatch`] applies several of them in one pass.

use std::fmt;

/// Marker in the build descriptor where the model dependency goes.
pub const MODELS_MARKER: &str = "/* --> Models <-- */";

/// Build-time version variable referenced by the model dependency line.
pub const API_VERSION_VARIABLE: &str = "${apiVersion}";

type Replacement = Box<dyn Fn(&str) -> String + Send + Sync>;

/// A named marker mapped to a replacement-producing function.
///
/// The function receives the full marker line so it can keep its indentation.
pub struct InsertionPoint {
    name: &'static str,
    marker: String,
    replacement: Replacement,
}

impl InsertionPoint {
    pub fn new(
        name: &'static str,
        marker: impl Into<String>,
        replacement: impl Fn(&str) -> String + Send + Sync + 'static,
    ) -> Self {
        Self {
            name,
            marker: marker.into(),
            replacement: Box::new(replacement),
        }
    }

    /// The Gradle dependency on the generated model artifact for `component`.
    pub fn model_dependency(component: &str) -> Self {
        let component = component.to_ascii_lowercase();
        Self::new("models", MODELS_MARKER, move |line| {
            format!(
                "{}implementation(\"no.fint:fint-{}-model-java:{}\")",
                indentation(line),
                component,
                API_VERSION_VARIABLE
            )
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    fn matches(&self, line: &str) -> bool {
        line.contains(&self.marker)
    }

    fn replace(&self, line: &str) -> String {
        (self.replacement)(line)
    }
}

impl fmt::Debug for InsertionPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InsertionPoint")
            .field("name", &self.name)
            .field("marker", &self.marker)
            .finish_non_exhaustive()
    }
}

/// A set of insertion points applied together.
#[derive(Debug, Default)]
pub struct TextPatch {
    points: Vec<InsertionPoint>,
}

/// Result of applying a [`TextPatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchOutcome {
    pub content: String,
    /// Names of insertion points whose marker was found.
    pub applied: Vec<&'static str>,
    /// Names of insertion points whose marker never appeared.
    pub missing: Vec<&'static str>,
}

impl TextPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, point: InsertionPoint) -> Self {
        self.points.push(point);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Replace every line containing a marker. A line is handled by the
    /// first point whose marker it contains.
    pub fn apply(&self, content: &str) -> PatchOutcome {
        let mut hits = vec![false; self.points.len()];

        let lines: Vec<String> = content
            .split('\n')
            .map(|line| {
                let (body, cr) = match line.strip_suffix('\r') {
                    Some(body) => (body, "\r"),
                    None => (line, ""),
                };
                match self.points.iter().position(|p| p.matches(body)) {
                    Some(idx) => {
                        hits[idx] = true;
                        format!("{}{}", self.points[idx].replace(body), cr)
                    }
                    None => line.to_string(),
                }
            })
            .collect();

        let (applied, missing) = self.points.iter().zip(hits).fold(
            (Vec::new(), Vec::new()),
            |(mut applied, mut missing), (point, hit)| {
                if hit {
                    applied.push(point.name());
                } else {
                    missing.push(point.name());
                }
                (applied, missing)
            },
        );

        PatchOutcome {
            content: lines.join("\n"),
            applied,
            missing,
        }
    }
}

fn indentation(line: &str) -> &str {
    let trimmed = line.trim_start();
    &line[..line.len() - trimmed.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRADLE: &str = "dependencies {\n    /* --> Models <-- */\n    testImplementation('junit:junit')\n}\n";

    #[test]
    fn model_dependency_replaces_marker_line() {
        let outcome = TextPatch::new()
            .with(InsertionPoint::model_dependency("felles"))
            .apply(GRADLE);

        assert_eq!(outcome.applied, vec!["models"]);
        assert!(outcome.missing.is_empty());
        assert!(!outcome.content.contains(MODELS_MARKER));
        assert!(
            outcome
                .content
                .contains("    implementation(\"no.fint:fint-felles-model-java:${apiVersion}\")")
        );
        // surrounding lines and the trailing newline survive
        assert!(outcome.content.contains("testImplementation('junit:junit')"));
        assert!(outcome.content.ends_with("}\n"));
    }

    #[test]
    fn missing_marker_is_reported_and_content_unchanged() {
        let outcome = TextPatch::new()
            .with(InsertionPoint::model_dependency("felles"))
            .apply("dependencies {}\n");

        assert!(outcome.applied.is_empty());
        assert_eq!(outcome.missing, vec!["models"]);
        assert_eq!(outcome.content, "dependencies {}\n");
    }

    #[test]
    fn several_points_apply_in_one_pass() {
        let patch = TextPatch::new()
            .with(InsertionPoint::new("name", "@@NAME@@", |_| "rootProject.name = 'x'".into()))
            .with(InsertionPoint::model_dependency("utdanning"));

        let outcome = patch.apply("@@NAME@@\n  /* --> Models <-- */");
        assert_eq!(outcome.applied, vec!["name", "models"]);
        assert_eq!(
            outcome.content,
            "rootProject.name = 'x'\n  implementation(\"no.fint:fint-utdanning-model-java:${apiVersion}\")"
        );
    }

    #[test]
    fn crlf_line_endings_are_preserved() {
        let outcome = TextPatch::new()
            .with(InsertionPoint::model_dependency("felles"))
            .apply("a\r\n/* --> Models <-- */\r\nb");
        assert!(outcome.content.contains("${apiVersion}\")\r\nb"));
    }
}
