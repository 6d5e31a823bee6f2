//! Result Renderer — converts an `AnalysisResult` into a presentation model.
//!
//! `build_report` holds the only business rule in the presentation layer: the
//! course upsell appears when the score is below `UPSELL_THRESHOLD`. `html` turns
//! the model into markup.

pub mod html;

use serde::Serialize;

use crate::analysis::AnalysisResult;

pub const UPSELL_THRESHOLD: u8 = 70;

pub const NO_HARD_GAPS_MESSAGE: &str = "No missing hard skills detected!";
pub const NO_SOFT_GAPS_MESSAGE: &str = "Your soft skills look great!";
pub const UPSELL_WARNING: &str =
    "Your score is below 70%. We recommend this course to bridge the gap:";
pub const COMPLETION_MESSAGE: &str = "Analysis Complete! Good luck with your application.";

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub course_enroll_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreCard {
    pub label: &'static str,
    pub score: u8,
    /// e.g. "45%"
    pub display: String,
    /// score / 100, for the progress indicator.
    pub progress: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseOffer {
    pub title: String,
    pub enroll_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Upsell {
    pub heading: &'static str,
    pub warning: &'static str,
    /// First recommended course, when the model suggested any.
    pub course: Option<CourseOffer>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkillSection {
    Tags { skills: Vec<String> },
    Confirmation { message: &'static str },
}

impl SkillSection {
    fn from_skills(skills: &[String], confirmation: &'static str) -> Self {
        if skills.is_empty() {
            SkillSection::Confirmation {
                message: confirmation,
            }
        } else {
            SkillSection::Tags {
                skills: skills.to_vec(),
            }
        }
    }

    #[cfg(test)]
    pub fn tags(&self) -> &[String] {
        match self {
            SkillSection::Tags { skills } => skills,
            SkillSection::Confirmation { .. } => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BulletPair {
    pub before: String,
    pub after: String,
}

/// Everything the report page shows, in display order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportView {
    pub score: ScoreCard,
    pub upsell: Option<Upsell>,
    pub hard_skills: SkillSection,
    pub soft_skills: SkillSection,
    pub bullet_pairs: Vec<BulletPair>,
    pub completion_message: &'static str,
}

pub fn build_report(result: &AnalysisResult, options: &RenderOptions) -> ReportView {
    let score = result.match_score.min(AnalysisResult::MAX_SCORE);

    let upsell = (score < UPSELL_THRESHOLD).then(|| Upsell {
        heading: "Boost Your Score",
        warning: UPSELL_WARNING,
        course: result.recommended_courses.first().map(|title| CourseOffer {
            title: title.clone(),
            enroll_url: options.course_enroll_url.clone(),
        }),
    });

    ReportView {
        score: ScoreCard {
            label: "ATS Compatibility",
            score,
            display: format!("{score}%"),
            progress: f32::from(score) / 100.0,
        },
        upsell,
        hard_skills: SkillSection::from_skills(&result.missing_hard_skills, NO_HARD_GAPS_MESSAGE),
        soft_skills: SkillSection::from_skills(&result.missing_soft_skills, NO_SOFT_GAPS_MESSAGE),
        bullet_pairs: result
            .rewritten_bullets
            .iter()
            .map(|b| BulletPair {
                before: b.original.clone(),
                after: b.optimized.clone(),
            })
            .collect(),
        completion_message: COMPLETION_MESSAGE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::models::RewrittenBullet;

    fn options() -> RenderOptions {
        RenderOptions {
            course_enroll_url: "https://www.udemy.com".to_string(),
        }
    }

    fn result(score: u8, courses: &[&str]) -> AnalysisResult {
        AnalysisResult {
            match_score: score,
            missing_hard_skills: vec!["Agile".to_string(), "JIRA".to_string()],
            missing_soft_skills: vec![],
            recommended_courses: courses.iter().map(|c| c.to_string()).collect(),
            rewritten_bullets: vec![RewrittenBullet {
                original: "Led a team of 5 engineers".to_string(),
                optimized: "Led a cross-functional team of 5 engineers using Agile methodologies"
                    .to_string(),
            }],
        }
    }

    #[test]
    fn test_low_score_upsell_names_first_course() {
        let view = build_report(&result(45, &["Udemy: Agile", "Coursera: JIRA"]), &options());
        let upsell = view.upsell.expect("upsell expected below threshold");
        let course = upsell.course.expect("course expected");
        assert_eq!(course.title, "Udemy: Agile");
        assert_eq!(course.enroll_url, "https://www.udemy.com");
    }

    #[test]
    fn test_low_score_without_courses_keeps_block_but_no_course() {
        let view = build_report(&result(30, &[]), &options());
        let upsell = view.upsell.expect("upsell expected below threshold");
        assert!(upsell.course.is_none());
    }

    #[test]
    fn test_threshold_score_has_no_upsell() {
        assert!(build_report(&result(70, &["Udemy: Agile"]), &options())
            .upsell
            .is_none());
        assert!(build_report(&result(69, &["Udemy: Agile"]), &options())
            .upsell
            .is_some());
        assert!(build_report(&result(100, &["Udemy: Agile"]), &options())
            .upsell
            .is_none());
    }

    #[test]
    fn test_empty_hard_skills_render_confirmation_and_no_tags() {
        let mut analysis = result(80, &[]);
        analysis.missing_hard_skills.clear();
        let view = build_report(&analysis, &options());
        assert_eq!(
            view.hard_skills,
            SkillSection::Confirmation {
                message: NO_HARD_GAPS_MESSAGE
            }
        );
        assert!(view.hard_skills.tags().is_empty());
    }

    #[test]
    fn test_skill_tags_keep_encounter_order() {
        let view = build_report(&result(45, &[]), &options());
        assert_eq!(view.hard_skills.tags(), ["Agile", "JIRA"]);
        assert_eq!(
            view.soft_skills,
            SkillSection::Confirmation {
                message: NO_SOFT_GAPS_MESSAGE
            }
        );
    }

    #[test]
    fn test_score_card_display_and_progress() {
        let view = build_report(&result(45, &[]), &options());
        assert_eq!(view.score.display, "45%");
        assert!((view.score.progress - 0.45).abs() < f32::EPSILON);
    }

    #[test]
    fn test_bullet_pairs_follow_list_order_and_tolerate_empty() {
        let mut analysis = result(45, &[]);
        analysis.rewritten_bullets.push(RewrittenBullet {
            original: "second".to_string(),
            optimized: "second, optimized".to_string(),
        });
        let view = build_report(&analysis, &options());
        assert_eq!(view.bullet_pairs.len(), 2);
        assert_eq!(view.bullet_pairs[1].before, "second");

        analysis.rewritten_bullets.clear();
        assert!(build_report(&analysis, &options()).bullet_pairs.is_empty());
    }
}
