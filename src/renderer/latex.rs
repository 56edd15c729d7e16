//! LaTeX generation from a résumé record

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::parser::record::{
    Certificate, Education, Honor, ResumeRecord, SectionEntry, SectionKind, Skill, WorkExperience,
};
use crate::theme::Theme;

use super::LatexConfig;

/// Comment rule separating blocks of the generated source
const RULE: &str = "%-------------------------------------------------------------------------------";

/// Separator Awesome-CV uses between two roles in `\position`
pub const POSITION_SEPARATOR: &str = r"{\enskip\cdotp\enskip}";

/// `**bold**`, `__bold__`, `*italic*` and `[label](url)`. Markers must hug
/// their text, so a lone `*` or `a * b` stays literal.
static INLINE_MARKUP_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"\*\*([^*\s](?:[^*]*[^*\s])?)\*\*",
        r"|__([^_\s](?:[^_]*[^_\s])?)__",
        r"|\*([^*\s](?:[^*]*[^*\s])?)\*",
        r"|\[([^\]]+)\]\(([^()\s{}\\]+)\)",
    ))
    .expect("valid inline markup regex")
});
static PARAGRAPH_BREAK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n[ \t\r]*\n").expect("valid paragraph break regex"));

/// Build the document incrementally
pub struct LatexBuilder {
    config: LatexConfig,
    theme: Theme,
    personal: Vec<String>,
    footer_name: String,
    sections: Vec<String>,
}

impl LatexBuilder {
    /// Create a new builder
    pub fn new(config: LatexConfig, theme: Theme) -> Self {
        Self {
            config,
            theme,
            personal: vec![],
            footer_name: String::new(),
            sections: vec![],
        }
    }

    /// Add the header commands (`\name`, `\position`, contact lines, `\quote`)
    pub fn add_personal_info(&mut self, record: &ResumeRecord) {
        if !record.first_name.trim().is_empty() || !record.last_name.trim().is_empty() {
            self.personal.push(format!(
                r"\name{{{}}}{{{}}}",
                text(&record.first_name),
                text(&record.last_name)
            ));
        }

        let position = render_position(&record.position);
        if !position.is_empty() {
            self.personal.push(format!(r"\position{{{}}}", position));
        }

        let contacts = [
            ("address", &record.address),
            ("mobile", &record.mobile),
            ("email", &record.email),
            ("homepage", &record.homepage),
            ("github", &record.github),
            ("linkedin", &record.linkedin),
            ("twitter", &record.twitter),
        ];
        for (command, value) in contacts {
            let value = text(value);
            if !value.is_empty() {
                self.personal.push(format!(r"\{}{{{}}}", command, value));
            }
        }

        let quote = text(&record.quote);
        if !quote.is_empty() {
            self.personal.push(format!(r"\quote{{``{}''}}", quote));
        }

        self.footer_name = text(&record.full_name());
    }

    /// Add the summary paragraph; skipped when blank. Blank lines in the
    /// text separate paragraphs.
    pub fn add_summary(&mut self, summary: &str) {
        let paragraphs: Vec<String> = PARAGRAPH_BREAK_RE
            .split(summary)
            .map(render_markup)
            .filter(|paragraph| !paragraph.is_empty())
            .collect();
        if paragraphs.is_empty() {
            return;
        }
        self.sections.push(
            [
                RULE.to_string(),
                r"\cvsection{Summary}".to_string(),
                String::new(),
                r"\begin{cvparagraph}".to_string(),
                paragraphs.join("\n\n"),
                r"\end{cvparagraph}".to_string(),
            ]
            .join("\n"),
        );
    }

    pub fn add_work_experience(&mut self, entries: &[WorkExperience]) {
        let body = complete(entries)
            .map(|job| {
                cventry(
                    [
                        (&job.title, "Job title"),
                        (&job.company, "Organization"),
                        (&job.location, "Location"),
                        (&job.date, "Date(s)"),
                    ],
                    &job.bullets,
                )
            })
            .collect();
        self.add_section(SectionKind::WorkExperience, "cventries", body);
    }

    pub fn add_education(&mut self, entries: &[Education]) {
        let body = complete(entries)
            .map(|edu| {
                cventry(
                    [
                        (&edu.degree, "Degree"),
                        (&edu.institution, "Institution"),
                        (&edu.location, "Location"),
                        (&edu.date, "Date(s)"),
                    ],
                    &edu.bullets,
                )
            })
            .collect();
        self.add_section(SectionKind::Education, "cventries", body);
    }

    pub fn add_skills(&mut self, entries: &[Skill]) {
        let body = complete(entries).map(cvskill).collect();
        self.add_section(SectionKind::Skills, "cvskills", body);
    }

    pub fn add_certificates(&mut self, entries: &[Certificate]) {
        let body = complete(entries)
            .map(|cert| {
                cventry(
                    [
                        (&cert.name, "Certificate"),
                        (&cert.issuer, "Issuer"),
                        (&cert.location, "Location"),
                        (&cert.date, "Date(s)"),
                    ],
                    &cert.bullets,
                )
            })
            .collect();
        self.add_section(SectionKind::Certificates, "cventries", body);
    }

    pub fn add_honors(&mut self, entries: &[Honor]) {
        let body = complete(entries).map(cvhonor).collect();
        self.add_section(SectionKind::Honors, "cvhonors", body);
    }

    fn add_section(&mut self, kind: SectionKind, environment: &str, body: Vec<String>) {
        match section(kind, environment, &body) {
            Some(block) => self.sections.push(block),
            None => debug!(section = kind.name(), "omitting empty section"),
        }
    }

    /// Assemble the complete document source
    pub fn build(self) -> String {
        let mut lines = vec![
            "%!TEX TS-program = xelatex".to_string(),
            "%!TEX encoding = UTF-8 Unicode".to_string(),
            "% Awesome-CV résumé generated by cv-generator".to_string(),
            String::new(),
            RULE.to_string(),
            "% CONFIGURATIONS".to_string(),
            RULE.to_string(),
            format!(
                r"\documentclass[{}pt, {}]{{awesome-cv}}",
                self.config.font_size.points(),
                self.config.paper.option()
            ),
            String::new(),
            r"\geometry{left=1.4cm, top=.8cm, right=1.4cm, bottom=1.8cm, footskip=.5cm}"
                .to_string(),
            String::new(),
            r"\fontdir[fonts/]".to_string(),
            String::new(),
            format!("% Accent color: {}", self.theme.name()),
            format!(r"\definecolor{{awesome}}{{HTML}}{{{}}}", self.theme.html_code()),
            String::new(),
            format!(
                r"\setbool{{acvSectionColorHighlight}}{{{}}}",
                self.config.section_highlight
            ),
            String::new(),
            r"\renewcommand{\acvHeaderSocialSep}{\quad\textbar\quad}".to_string(),
            String::new(),
            RULE.to_string(),
            "% PERSONAL INFORMATION".to_string(),
            RULE.to_string(),
        ];
        lines.extend(self.personal);
        lines.extend([
            String::new(),
            RULE.to_string(),
            r"\begin{document}".to_string(),
            String::new(),
            format!(r"\makecvheader[{}]", self.config.header_alignment.letter()),
        ]);

        if self.config.footer {
            let label = if self.footer_name.is_empty() {
                "Résumé".to_string()
            } else {
                format!("{}~~~·~~~Résumé", self.footer_name)
            };
            lines.extend([
                String::new(),
                r"\makecvfooter".to_string(),
                r"  {\today}".to_string(),
                format!("  {{{}}}", label),
                r"  {\thepage}".to_string(),
            ]);
        }

        for block in self.sections {
            lines.push(String::new());
            lines.push(block);
        }

        lines.extend([
            String::new(),
            RULE.to_string(),
            r"\end{document}".to_string(),
        ]);

        let mut source = lines.join("\n");
        source.push('\n');
        source
    }
}

/// Render a complete document for a record
pub fn render_latex(record: &ResumeRecord, theme: Theme, config: &LatexConfig) -> String {
    let mut builder = LatexBuilder::new(config.clone(), theme);
    builder.add_personal_info(record);
    builder.add_summary(&record.summary);
    builder.add_work_experience(&record.work_experience);
    builder.add_education(&record.education);
    builder.add_skills(&record.skills);
    builder.add_certificates(&record.certificates);
    builder.add_honors(&record.honors);
    builder.build()
}

/// Escape LaTeX special characters in a single pass, so replacement text is
/// never escaped again
pub fn escape_latex(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str(r"\textbackslash{}"),
            '~' => out.push_str(r"\textasciitilde{}"),
            '^' => out.push_str(r"\textasciicircum{}"),
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

/// Collapse whitespace runs, newlines included, to single spaces. A blank
/// line inside a macro argument is a paragraph break and fails to compile.
fn single_line(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Argument text: one line, escaped
fn text(s: &str) -> String {
    escape_latex(&single_line(s))
}

/// Render inline Markdown (`**bold**`, `__bold__`, `*italic*`,
/// `[label](url)`) as LaTeX. Text inside and between the markers is
/// escaped exactly once; anything that does not match stays literal.
pub fn render_markup(s: &str) -> String {
    let s = single_line(s);
    let mut out = String::with_capacity(s.len());
    let mut last = 0;
    for caps in INLINE_MARKUP_RE.captures_iter(&s) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        out.push_str(&escape_latex(&s[last..whole.start()]));
        if let Some(bold) = caps.get(1).or_else(|| caps.get(2)) {
            out.push_str(&format!(r"\textbf{{{}}}", escape_latex(bold.as_str())));
        } else if let Some(italic) = caps.get(3) {
            out.push_str(&format!(r"\textit{{{}}}", escape_latex(italic.as_str())));
        } else if let (Some(label), Some(url)) = (caps.get(4), caps.get(5)) {
            out.push_str(&format!(
                r"\href{{{}}}{{{}}}",
                escape_url(url.as_str()),
                escape_latex(label.as_str())
            ));
        }
        last = whole.end();
    }
    out.push_str(&escape_latex(&s[last..]));
    out
}

/// `\href` reads its URL nearly verbatim; only `%` and `#` need a backslash.
/// Braces and backslashes never reach here, the link pattern excludes them.
fn escape_url(url: &str) -> String {
    let mut out = String::with_capacity(url.len());
    for c in url.chars() {
        if matches!(c, '%' | '#') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Split a position line on the typeset separator (or ` | `), escape each
/// role and join them with the separator again
fn render_position(raw: &str) -> String {
    raw.split(POSITION_SEPARATOR)
        .flat_map(|part| part.split(" | "))
        .map(text)
        .filter(|role| !role.is_empty())
        .collect::<Vec<_>>()
        .join(POSITION_SEPARATOR)
}

fn complete<T: SectionEntry>(entries: &[T]) -> impl Iterator<Item = &T> {
    entries.iter().filter(|entry| entry.is_complete())
}

fn section(kind: SectionKind, environment: &str, body: &[String]) -> Option<String> {
    if body.is_empty() {
        return None;
    }
    Some(
        [
            RULE.to_string(),
            format!(r"\cvsection{{{}}}", escape_latex(kind.heading())),
            String::new(),
            format!(r"\begin{{{}}}", environment),
            body.join("\n\n"),
            format!(r"\end{{{}}}", environment),
        ]
        .join("\n"),
    )
}

fn cventry(fields: [(&String, &str); 4], bullets: &[String]) -> String {
    let mut lines = vec![r"  \cventry".to_string()];
    for (value, comment) in fields {
        lines.push(format!("    {{{}}} % {}", text(value), comment));
    }

    let items: Vec<_> = bullets
        .iter()
        .map(|bullet| render_markup(bullet))
        .filter(|bullet| !bullet.is_empty())
        .collect();
    if items.is_empty() {
        lines.push("    {}".to_string());
    } else {
        lines.push("    {".to_string());
        lines.push(r"      \begin{cvitems}".to_string());
        for item in items {
            lines.push(format!(r"        \item {{{}}}", item));
        }
        lines.push(r"      \end{cvitems}".to_string());
        lines.push("    }".to_string());
    }
    lines.join("\n")
}

fn cvskill(skill: &Skill) -> String {
    [
        r"  \cvskill".to_string(),
        format!("    {{{}}} % Category", text(&skill.category)),
        format!("    {{{}}} % Skills", text(&skill.skills)),
    ]
    .join("\n")
}

fn cvhonor(honor: &Honor) -> String {
    [
        r"  \cvhonor".to_string(),
        format!("    {{{}}} % Award", text(&honor.name)),
        format!("    {{{}}} % Event", text(&honor.issuer)),
        format!("    {{{}}} % Location", text(&honor.location)),
        format!("    {{{}}} % Date(s)", text(&honor.date)),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_latex() {
        assert_eq!(escape_latex("R&D"), r"R\&D");
        assert_eq!(escape_latex("100%"), r"100\%");
        assert_eq!(escape_latex("snake_case #1 $5"), r"snake\_case \#1 \$5");
        assert_eq!(escape_latex("{x}"), r"\{x\}");
        assert_eq!(escape_latex("a~b^c"), r"a\textasciitilde{}b\textasciicircum{}c");
        assert_eq!(escape_latex(r"C:\dir"), r"C:\textbackslash{}dir");
    }

    #[test]
    fn test_escape_plain_text_unchanged() {
        assert_eq!(escape_latex("Go, Rust"), "Go, Rust");
        assert_eq!(escape_latex("Zürich"), "Zürich");
    }

    #[test]
    fn test_escape_is_deterministic_and_detectable_twice() {
        let input = r"50% of {R&D} \ ~";
        let once = escape_latex(input);
        assert_eq!(once, escape_latex(input));
        // Escaping an escaped string changes it again, so double escaping shows
        assert_ne!(escape_latex(&once), once);
    }

    #[test]
    fn test_position_separator() {
        assert_eq!(render_position("Engineer | Writer"), format!("Engineer{}Writer", POSITION_SEPARATOR));
        assert_eq!(
            render_position(r"Software Architect{\enskip\cdotp\enskip}R&D Lead"),
            format!(r"Software Architect{}R\&D Lead", POSITION_SEPARATOR)
        );
        assert_eq!(render_position("  "), "");
    }

    #[test]
    fn test_skills_section_snapshot() {
        let skills = vec![Skill {
            category: "Langs".to_string(),
            skills: "Go, Rust".to_string(),
        }];
        let body: Vec<String> = complete(&skills).map(cvskill).collect();
        let block = section(SectionKind::Skills, "cvskills", &body).unwrap();
        insta::assert_snapshot!(block, @r"
        %-------------------------------------------------------------------------------
        \cvsection{Skills}

        \begin{cvskills}
          \cvskill
            {Langs} % Category
            {Go, Rust} % Skills
        \end{cvskills}
        ");
    }

    #[test]
    fn test_cventry_with_and_without_bullets() {
        let title = "Eng".to_string();
        let empty = String::new();
        let with = cventry(
            [(&title, "Job title"), (&empty, "Organization"), (&empty, "Location"), (&empty, "Date(s)")],
            &["Did X".to_string(), "  ".to_string()],
        );
        assert!(with.contains(r"\begin{cvitems}"));
        assert!(with.contains(r"\item {Did X}"));
        assert_eq!(with.matches(r"\item").count(), 1);

        let without = cventry(
            [(&title, "Job title"), (&empty, "Organization"), (&empty, "Location"), (&empty, "Date(s)")],
            &[],
        );
        assert!(!without.contains("cvitems"));
        assert!(without.ends_with("    {}"));
    }

    #[test]
    fn test_empty_section_is_omitted() {
        assert!(section(SectionKind::Education, "cventries", &[]).is_none());
    }

    #[test]
    fn test_honors_heading_is_escaped() {
        let honors = vec![Honor {
            name: "Best Paper".to_string(),
            ..Default::default()
        }];
        let body: Vec<String> = complete(&honors).map(cvhonor).collect();
        let block = section(SectionKind::Honors, "cvhonors", &body).unwrap();
        assert!(block.contains(r"\cvsection{Honors \& Awards}"));
        assert!(block.contains(r"\begin{cvhonors}"));
    }

    #[test]
    fn test_theme_color_in_preamble() {
        let source = render_latex(&ResumeRecord::default(), Theme::Red, &LatexConfig::default());
        assert!(source.contains(r"\definecolor{awesome}{HTML}{DC3522}"));
        assert!(source.contains(r"\documentclass[11pt, a4paper]{awesome-cv}"));
        assert!(source.ends_with("\\end{document}\n"));
    }

    #[test]
    fn test_personal_info_commands() {
        let record = ResumeRecord {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada_l@example.com".to_string(),
            github: "ada".to_string(),
            quote: "Imagination is the discovering faculty".to_string(),
            ..Default::default()
        };
        let source = render_latex(&record, Theme::Emerald, &LatexConfig::default());
        assert!(source.contains(r"\name{Ada}{Lovelace}"));
        assert!(source.contains(r"\email{ada\_l@example.com}"));
        assert!(source.contains(r"\github{ada}"));
        assert!(source.contains(r"\quote{``Imagination is the discovering faculty''}"));
        assert!(source.contains("{Ada Lovelace~~~·~~~Résumé}"));
        assert!(!source.contains(r"\linkedin"));
        assert!(!source.contains(r"\position"));
    }

    #[test]
    fn test_footer_can_be_disabled() {
        let config = LatexConfig::default().with_footer(false);
        let source = render_latex(&ResumeRecord::default(), Theme::Red, &config);
        assert!(!source.contains(r"\makecvfooter"));
    }

    #[test]
    fn test_markup_conversion() {
        assert_eq!(
            render_markup("**Led** a *small* team of __10__"),
            r"\textbf{Led} a \textit{small} team of \textbf{10}"
        );
        assert_eq!(
            render_markup("See [R&D notes](https://example.com/a_b#c%20d)"),
            r"See \href{https://example.com/a_b\#c\%20d}{R\&D notes}"
        );
    }

    #[test]
    fn test_markup_escapes_exactly_once() {
        assert_eq!(render_markup("**50% & more**"), r"\textbf{50\% \& more}");
        assert_eq!(render_markup("snake_case_name"), r"snake\_case\_name");
        assert_eq!(render_markup("a * b * c"), "a * b * c");
        assert_eq!(render_markup("2 * 3 = 6"), "2 * 3 = 6");
        let once = render_markup("*x_y*");
        assert_eq!(once, r"\textit{x\_y}");
        assert_eq!(once, render_markup("*x_y*"));
    }

    #[test]
    fn test_markup_in_bullets_and_summary() {
        let record = ResumeRecord {
            summary: "Built **engines**.\n\n  \nWrote [notes](https://example.org).".to_string(),
            work_experience: vec![WorkExperience {
                title: "Analyst".to_string(),
                bullets: vec!["Wrote *Note G*".to_string()],
                ..Default::default()
            }],
            ..Default::default()
        };
        let source = render_latex(&record, Theme::Red, &LatexConfig::default());
        assert!(source.contains(r"\item {Wrote \textit{Note G}}"));
        assert!(source.contains(
            "Built \\textbf{engines}.\n\nWrote \\href{https://example.org}{notes}."
        ));
    }

    #[test]
    fn test_newlines_collapse_inside_arguments() {
        let record = ResumeRecord {
            first_name: "Ada\n\nAugusta".to_string(),
            skills: vec![Skill {
                category: "Langs".to_string(),
                skills: "Go,\n\nRust".to_string(),
            }],
            work_experience: vec![WorkExperience {
                title: "Analyst\n\n".to_string(),
                company: "Engines\n\nLtd".to_string(),
                bullets: vec!["one\n\ntwo".to_string()],
                ..Default::default()
            }],
            ..Default::default()
        };
        let source = render_latex(&record, Theme::Red, &LatexConfig::default());
        assert!(source.contains(r"\name{Ada Augusta}{}"));
        assert!(source.contains("{Go, Rust} % Skills"));
        assert!(source.contains("{Engines Ltd} % Organization"));
        assert!(source.contains(r"\item {one two}"));
        let body = source.split(r"\begin{document}").nth(1).unwrap();
        for block in body.trim().split("\n\n") {
            assert!(!block.trim().is_empty(), "empty paragraph in body");
        }
    }
}
