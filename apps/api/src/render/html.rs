//! HTML rendering for the single-page UI: sidebar form plus a main panel that shows
//! the landing steps, a warning/error banner, or the analysis report.

use std::fmt::Write;

use crate::render::{ReportView, SkillSection};

const PAGE_TITLE: &str = "CareerBoost";

/// Severity of a banner shown in place of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Warning,
    Error,
}

impl Notice {
    fn class(self) -> &'static str {
        match self {
            Notice::Warning => "notice warning",
            Notice::Error => "notice error",
        }
    }
}

fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '\'' => out.push_str("&#39;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Initial state: configuration hint and the "How it works" steps.
pub fn render_landing_page() -> String {
    let main = r#"<div class="notice info">👈 Please configure the sidebar to start your Career Boost.</div>
<p><strong>How it works:</strong></p>
<ol>
<li>Enter your OpenAI API Key.</li>
<li>Upload your existing Resume (PDF).</li>
<li>Paste a Job Description you want to apply for.</li>
<li>Click <strong>Boost My Career</strong> to see the magic!</li>
</ol>"#;
    page(main)
}

/// A single warning or error banner; no partial report.
pub fn render_notice_page(notice: Notice, message: &str) -> String {
    let main = format!(
        r#"<div class="{}" role="alert">{}</div>"#,
        notice.class(),
        escape_html(message)
    );
    page(&main)
}

pub fn render_report_page(report: &ReportView) -> String {
    page(&render_report(report))
}

/// Report body: score column, skill-gap column, then the bullet rewrites.
pub fn render_report(report: &ReportView) -> String {
    let mut out = String::new();

    // Score
    out.push_str(r#"<div class="columns"><section class="score">"#);
    out.push_str("<h3>Match Score</h3>");
    let _ = write!(
        out,
        r#"<div class="metric"><span class="label">{}</span><span class="value">{}</span></div>"#,
        report.score.label, report.score.display
    );
    let _ = write!(
        out,
        r#"<progress max="100" value="{}">{}</progress>"#,
        report.score.score, report.score.display
    );

    if let Some(upsell) = &report.upsell {
        out.push_str(r#"<div class="upsell"><hr>"#);
        let _ = write!(out, "<h4>🎓 {}</h4>", upsell.heading);
        let _ = write!(out, r#"<div class="notice warning">{}</div>"#, upsell.warning);
        if let Some(course) = &upsell.course {
            let _ = write!(
                out,
                r#"<div class="notice info course">👉 <strong>{}</strong></div><a class="enroll" href="{}">Click here to enroll</a>"#,
                escape_html(&course.title),
                escape_html(&course.enroll_url)
            );
        }
        out.push_str("</div>");
    }
    out.push_str("</section>");

    // Skill gaps
    out.push_str(r#"<section class="gaps"><h3>🧩 Skill Gap Analysis</h3>"#);
    out.push_str("<p><strong>Missing Hard Skills:</strong></p>");
    render_skills(&mut out, &report.hard_skills, "tag hard");
    out.push_str("<p><strong>Missing Soft Skills:</strong></p>");
    render_skills(&mut out, &report.soft_skills, "tag soft");
    out.push_str("</section></div><hr>");

    // Rewrites
    out.push_str(r#"<section class="rewrites"><h3>✍️ Optimized Bullet Points</h3>"#);
    out.push_str(
        r#"<p class="caption">Here is how you can rewrite your experience to better match the job:</p>"#,
    );
    for pair in &report.bullet_pairs {
        let _ = write!(
            out,
            r#"<div class="pair"><div class="before"><strong>Before:</strong><p>{}</p></div><div class="after"><strong>After:</strong><p>{}</p></div></div><hr>"#,
            escape_html(&pair.before),
            escape_html(&pair.after)
        );
    }
    out.push_str("</section>");

    let _ = write!(
        out,
        r#"<div class="notice success">{}</div>"#,
        report.completion_message
    );
    out
}

fn render_skills(out: &mut String, section: &SkillSection, class: &str) {
    match section {
        SkillSection::Tags { skills } => {
            out.push_str(r#"<div class="tags">"#);
            for skill in skills {
                let _ = write!(out, r#"<span class="{class}">{}</span>"#, escape_html(skill));
            }
            out.push_str("</div>");
        }
        SkillSection::Confirmation { message } => {
            let _ = write!(out, r#"<div class="notice success">{message}</div>"#);
        }
    }
}

fn page(main: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{PAGE_TITLE}</title>
<style>{STYLE}</style>
</head>
<body>
<aside>
<h2>⚙️ Configuration</h2>
<form method="post" action="/analyze" enctype="multipart/form-data">
<label>OpenAI API Key<input type="password" name="api_key" autocomplete="off"></label>
<hr>
<label>Upload your CV (PDF)<input type="file" name="resume" accept="application/pdf,.pdf"></label>
<label>Paste Job Description (JD)<textarea name="job_description" rows="10" placeholder="Paste the full job description here..."></textarea></label>
<button type="submit">🚀 Boost My Career</button>
</form>
</aside>
<main>
<h1>🚀 {PAGE_TITLE}</h1>
<h2>The Lost Student Solution</h2>
<hr>
{main}
</main>
</body>
</html>
"#
    )
}

const STYLE: &str = "body{display:flex;font-family:sans-serif;margin:0}\
aside{width:22rem;padding:1rem;background:#f0f2f6}\
aside label{display:block;margin-bottom:1rem}\
aside input,aside textarea,aside button{display:block;width:100%}\
main{flex:1;padding:1rem 2rem}\
.columns{display:flex;gap:2rem}.score{flex:1}.gaps{flex:2}\
.tag{display:inline-block;padding:5px 10px;border-radius:15px;margin-right:5px}\
.tag.hard{background:#ffcccb;color:#8b0000}.tag.soft{background:#e0f7fa;color:#006064}\
.pair{display:flex;gap:1rem}.pair>div{flex:1;padding:.5rem}\
.before{background:#fde2e2}.after{background:#e2f7e2}\
.notice{padding:.75rem;border-radius:.5rem;margin:.5rem 0}\
.warning{background:#fff4ce}.error{background:#fde2e2}.info{background:#e1efff}.success{background:#e2f7e2}";
