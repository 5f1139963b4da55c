//! Default offline analysis backend built on a fixed skill vocabulary.
//!
//! Every contract is answered from a fixed skill vocabulary:
//! 1. The job description is turned into a keyword inventory. Each known skill
//!    gets a frequency and a position weight (title=1.0, requirements=0.8,
//!    responsibilities=0.6, nice-to-have=0.4, about=0.3);
//!    weighted_score = frequency × position_weight.
//! 2. ATS score = Σ(strength × weighted_score) / Σ(weighted_score) × 100, where a
//!    resume mentioning the keyword twice or more has strength 1.0, once 0.6,
//!    never 0.0.
//! 3. Strong (≥0.8), partial (0.4–0.79) and gap (<0.4) keywords drive suggestions.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::analysis::models::{
    CareerDna, JobMatch, LearningPath, LearningTask, ProcessedResumeData, SkillGapAnalysis,
    SkillLevel, TaskType,
};
use crate::analysis::service::{AnalysisError, AnalysisService};
use crate::resume::model::PersonalInfo;

// ────────────────────────────────────────────────────────────────────────────
// Vocabulary
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SkillCategory {
    Language,
    Frontend,
    Backend,
    Data,
    Cloud,
    Testing,
    Product,
    Design,
}

impl SkillCategory {
    fn label(self) -> &'static str {
        match self {
            SkillCategory::Language => "Programming languages",
            SkillCategory::Frontend => "Frontend development",
            SkillCategory::Backend => "Backend services",
            SkillCategory::Data => "Data and analytics",
            SkillCategory::Cloud => "Cloud and DevOps",
            SkillCategory::Testing => "Testing and quality",
            SkillCategory::Product => "Product management",
            SkillCategory::Design => "Design and UX",
        }
    }
}

struct KnownSkill {
    name: &'static str,
    aliases: &'static [&'static str],
    category: SkillCategory,
}

const fn skill(
    name: &'static str,
    aliases: &'static [&'static str],
    category: SkillCategory,
) -> KnownSkill {
    KnownSkill {
        name,
        aliases,
        category,
    }
}

use SkillCategory::*;

static VOCABULARY: &[KnownSkill] = &[
    skill("JavaScript", &[], Language),
    skill("TypeScript", &[], Language),
    skill("Python", &[], Language),
    skill("Java", &[], Language),
    skill("Go", &["golang"], Language),
    skill("Rust", &[], Language),
    skill("C++", &[], Language),
    skill("C#", &[], Language),
    skill("Ruby", &[], Language),
    skill("Kotlin", &[], Language),
    skill("Swift", &[], Language),
    skill("SQL", &[], Language),
    skill("React", &["react.js", "reactjs"], Frontend),
    skill("Next.js", &["nextjs"], Frontend),
    skill("Vue.js", &["vue"], Frontend),
    skill("Angular", &[], Frontend),
    skill("HTML", &["html5"], Frontend),
    skill("CSS", &["css3"], Frontend),
    skill("Tailwind CSS", &["tailwind"], Frontend),
    skill("Redux", &[], Frontend),
    skill("Node.js", &["node", "nodejs"], Backend),
    skill("Express", &["express.js"], Backend),
    skill("Django", &[], Backend),
    skill("FastAPI", &[], Backend),
    skill("Spring Boot", &["spring"], Backend),
    skill("GraphQL", &[], Backend),
    skill("REST APIs", &["rest api", "restful"], Backend),
    skill("Microservices", &["microservice"], Backend),
    skill("PostgreSQL", &["postgres"], Data),
    skill("MySQL", &[], Data),
    skill("MongoDB", &["mongo"], Data),
    skill("Redis", &[], Data),
    skill("Kafka", &[], Data),
    skill("Spark", &[], Data),
    skill("Machine Learning", &[], Data),
    skill("PyTorch", &[], Data),
    skill("TensorFlow", &[], Data),
    skill("Tableau", &[], Data),
    skill("Data Analysis", &["data analytics"], Data),
    skill("AWS", &["amazon web services"], Cloud),
    skill("GCP", &["google cloud"], Cloud),
    skill("Azure", &[], Cloud),
    skill("Docker", &[], Cloud),
    skill("Kubernetes", &["k8s"], Cloud),
    skill("Terraform", &[], Cloud),
    skill("CI/CD", &[], Cloud),
    skill("Git", &[], Cloud),
    skill("Linux", &[], Cloud),
    skill("Jest", &[], Testing),
    skill("Cypress", &[], Testing),
    skill("Selenium", &[], Testing),
    skill("Product Strategy", &[], Product),
    skill("User Research", &[], Product),
    skill("Agile", &[], Product),
    skill("Scrum", &[], Product),
    skill("A/B Testing", &["experimentation"], Product),
    skill("Stakeholder Management", &[], Product),
    skill("Roadmap", &["roadmapping"], Product),
    skill("Jira", &[], Product),
    skill("Google Analytics", &[], Product),
    skill("Mixpanel", &[], Product),
    skill("Figma", &[], Design),
    skill("Sketch", &[], Design),
    skill("UX", &["user experience"], Design),
];

fn lookup(name: &str) -> Option<&'static KnownSkill> {
    let lower = name.trim().to_lowercase();
    VOCABULARY.iter().find(|s| {
        s.name.to_lowercase() == lower || s.aliases.iter().any(|a| *a == lower)
    })
}

/// Canonical vocabulary name for a skill, or the trimmed input if unknown.
fn canonical(name: &str) -> String {
    lookup(name)
        .map(|s| s.name.to_string())
        .unwrap_or_else(|| name.trim().to_string())
}

fn same_skill(a: &str, b: &str) -> bool {
    canonical(a).eq_ignore_ascii_case(&canonical(b))
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '+' | '#' | '-')
}

/// Byte offsets of whole-word occurrences of `term`. Terms of one or two
/// characters ("Go", "UX") match case-sensitively; everything else ignores case.
fn term_positions(text: &str, term: &str) -> Vec<usize> {
    let (haystack, needle) = if term.chars().count() <= 2 {
        (text.to_string(), term.to_string())
    } else {
        (text.to_lowercase(), term.to_lowercase())
    };

    haystack
        .match_indices(&needle)
        .filter(|(start, matched)| {
            let before = haystack[..*start].chars().next_back();
            let after = haystack[start + matched.len()..].chars().next();
            !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
        })
        .map(|(start, _)| start)
        .collect()
}

fn count_term(text: &str, term: &str) -> usize {
    term_positions(text, term).len()
}

/// Mentions of a vocabulary skill under its name or any alias. Aliases that are
/// substrings of the name ("node" in "Node.js") would double count, so the
/// largest single count wins.
fn mentions(text: &str, skill: &KnownSkill) -> usize {
    std::iter::once(skill.name)
        .chain(skill.aliases.iter().copied())
        .map(|term| count_term(text, term))
        .max()
        .unwrap_or(0)
}

fn first_mention(text: &str, skill: &KnownSkill) -> Option<usize> {
    std::iter::once(skill.name)
        .chain(skill.aliases.iter().copied())
        .filter_map(|term| term_positions(text, term).first().copied())
        .min()
}

// ────────────────────────────────────────────────────────────────────────────
// Job description keyword inventory
// ────────────────────────────────────────────────────────────────────────────

/// A single keyword from the job description, weighted by position and frequency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordEntry {
    pub keyword: String,
    pub frequency: u32,
    pub position_weight: f32,
    /// frequency * position_weight
    pub weighted_score: f32,
}

const TITLE_WEIGHT: f32 = 1.0;
const REQUIRED_WEIGHT: f32 = 0.8;
const RESPONSIBILITY_WEIGHT: f32 = 0.6;
const NICE_TO_HAVE_WEIGHT: f32 = 0.4;
const ABOUT_WEIGHT: f32 = 0.3;

fn classify_line(line: &str) -> Option<f32> {
    let lower = line.to_lowercase();
    if ["nice to have", "preferred", "bonus", "a plus"]
        .iter()
        .any(|m| lower.contains(m))
    {
        Some(NICE_TO_HAVE_WEIGHT)
    } else if ["require", "must", "you need", "qualifications"]
        .iter()
        .any(|m| lower.contains(m))
    {
        Some(REQUIRED_WEIGHT)
    } else if ["responsibilit", "you will", "what you'll do"]
        .iter()
        .any(|m| lower.contains(m))
    {
        Some(RESPONSIBILITY_WEIGHT)
    } else if ["about us", "about the company", "who we are"]
        .iter()
        .any(|m| lower.contains(m))
    {
        Some(ABOUT_WEIGHT)
    } else {
        None
    }
}

fn is_section_header(line: &str) -> bool {
    line.ends_with(':') && line.split_whitespace().count() <= 4
}

/// Builds the weighted keyword inventory, strongest first.
pub fn keyword_inventory(job_description: &str) -> Vec<KeywordEntry> {
    let lines: Vec<&str> = job_description
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let mut weights = Vec::with_capacity(lines.len());
    let mut section: Option<f32> = None;
    for (idx, line) in lines.iter().enumerate() {
        let own = classify_line(line);
        if is_section_header(line) {
            section = own;
        }
        let weight = if idx == 0 {
            TITLE_WEIGHT
        } else {
            own.or(section).unwrap_or(RESPONSIBILITY_WEIGHT)
        };
        weights.push(weight);
    }

    let mut inventory: Vec<KeywordEntry> = VOCABULARY
        .iter()
        .filter_map(|skill| {
            let mut frequency = 0u32;
            let mut position_weight = 0.0_f32;
            for (line, weight) in lines.iter().zip(&weights) {
                let count = mentions(line, skill) as u32;
                if count > 0 {
                    frequency += count;
                    position_weight = position_weight.max(*weight);
                }
            }
            (frequency > 0).then(|| KeywordEntry {
                keyword: skill.name.to_string(),
                frequency,
                position_weight,
                weighted_score: frequency as f32 * position_weight,
            })
        })
        .collect();

    inventory.sort_by(|a, b| b.weighted_score.total_cmp(&a.weighted_score));
    inventory
}

// ────────────────────────────────────────────────────────────────────────────
// Resume parsing
// ────────────────────────────────────────────────────────────────────────────

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("valid email regex")
});
// Digits and separators on a single line.
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\+?\d[\d \t().-]{6,}\d").expect("valid phone regex"));
static YEAR_RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:19|20)\d{2}\s*-\s*(?:19|20)\d{2}$").expect("valid year range regex")
});
const MIN_PHONE_DIGITS: usize = 7;
static LINKEDIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:https?://)?(?:www\.)?linkedin\.com/in/[A-Za-z0-9_-]+")
        .expect("valid linkedin regex")
});
static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://[^\s|,]+").expect("valid url regex"));
static LOCATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z][A-Za-z .'-]+, (?:[A-Z]{2}|[A-Z][a-z]+)$").expect("valid location regex")
});
static YEARS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d{1,2})\+?\s*(?:years|yrs)").expect("valid years regex")
});

fn find_phone(text: &str) -> Option<String> {
    PHONE_RE
        .find_iter(text)
        .map(|m| m.as_str().trim())
        .find(|candidate| {
            candidate.chars().filter(char::is_ascii_digit).count() >= MIN_PHONE_DIGITS
                && !YEAR_RANGE_RE.is_match(candidate)
        })
        .map(str::to_string)
}

fn is_heading(line: &str) -> bool {
    line.chars().any(char::is_alphabetic)
        && line
            .chars()
            .filter(|c| c.is_alphabetic())
            .all(char::is_uppercase)
}

fn title_case(line: &str) -> String {
    line.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn parse_name(lines: &[&str]) -> String {
    lines
        .iter()
        .find(|line| {
            !line.contains('@')
                && !line.to_lowercase().contains("http")
                && line.chars().any(char::is_alphabetic)
                && line.split_whitespace().count() <= 6
        })
        .map(|line| {
            if is_heading(line) {
                title_case(line)
            } else {
                line.to_string()
            }
        })
        .unwrap_or_default()
}

fn parse_summary(lines: &[&str]) -> String {
    let marker = lines.iter().position(|line| {
        let upper = line.to_uppercase();
        is_heading(line)
            && ["SUMMARY", "PROFILE", "OBJECTIVE"]
                .iter()
                .any(|m| upper.contains(m))
    });

    if let Some(idx) = marker {
        let body: Vec<&str> = lines[idx + 1..]
            .iter()
            .take_while(|line| !is_heading(line))
            .copied()
            .collect();
        if !body.is_empty() {
            return body.join(" ");
        }
    }

    lines
        .iter()
        .find(|line| line.split_whitespace().count() >= 12)
        .map(|line| line.to_string())
        .unwrap_or_default()
}

fn parse_skills(text: &str) -> Vec<String> {
    let mut found: Vec<(usize, &'static str)> = VOCABULARY
        .iter()
        .filter_map(|skill| first_mention(text, skill).map(|pos| (pos, skill.name)))
        .collect();
    found.sort_by_key(|(pos, _)| *pos);
    found.into_iter().map(|(_, name)| name.to_string()).collect()
}

/// Heuristic structure extraction from raw resume text.
pub fn parse_resume_text(text: &str) -> ProcessedResumeData {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let linkedin = LINKEDIN_RE
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default();
    let website = URL_RE
        .find_iter(text)
        .map(|m| m.as_str())
        .find(|url| !url.to_lowercase().contains("linkedin"))
        .unwrap_or_default()
        .to_string();

    let personal_info = PersonalInfo {
        name: parse_name(&lines),
        email: EMAIL_RE
            .find(text)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default(),
        phone: find_phone(text).unwrap_or_default(),
        location: lines
            .iter()
            .find(|line| LOCATION_RE.is_match(line))
            .map(|line| line.to_string())
            .unwrap_or_default(),
        linkedin,
        website,
    };

    ProcessedResumeData {
        personal_info,
        summary: parse_summary(&lines),
        skills: parse_skills(text),
        extracted_text: text.to_string(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Job match
// ────────────────────────────────────────────────────────────────────────────

const STRONG_THRESHOLD: f32 = 0.8;
const PARTIAL_THRESHOLD: f32 = 0.4;

fn has_quantified_impact(text: &str) -> bool {
    text.contains('%') || text.contains('$') || text.chars().any(|c| c.is_ascii_digit())
}

/// Builds the headline suggestion from score and gaps.
fn build_recommendation(score: u8, gaps: &[&KeywordEntry]) -> String {
    let top_gaps: Vec<&str> = gaps.iter().take(3).map(|g| g.keyword.as_str()).collect();

    if score >= 80 {
        "Strong match. Your resume already covers the key requirements.".to_string()
    } else if score >= 60 {
        format!(
            "Moderate match ({score}/100). Consider adding evidence for: {}.",
            top_gaps.join(", ")
        )
    } else if top_gaps.is_empty() {
        format!("Low match ({score}/100). Mention the posting's skills more than once.")
    } else {
        format!(
            "Low match ({score}/100). Significant gaps: {}. Tailor your resume before applying.",
            top_gaps.join(", ")
        )
    }
}

pub fn compute_job_match(resume_text: &str, job_description: &str) -> JobMatch {
    let inventory = keyword_inventory(job_description);
    if inventory.is_empty() {
        return JobMatch {
            ats_score: 0,
            suggestions: vec![
                "No recognizable skills found in the job description. Paste the full posting to score it."
                    .to_string(),
            ],
        };
    }

    let mut partial = Vec::new();
    let mut gaps = Vec::new();
    let mut total_weighted = 0.0_f32;
    let mut total_score = 0.0_f32;

    for entry in &inventory {
        let count = lookup(&entry.keyword)
            .map(|s| mentions(resume_text, s))
            .unwrap_or(0);
        let strength = match count {
            0 => 0.0,
            1 => 0.6,
            _ => 1.0,
        };

        total_weighted += entry.weighted_score;
        total_score += strength * entry.weighted_score;

        if strength < PARTIAL_THRESHOLD {
            gaps.push(entry);
        } else if strength < STRONG_THRESHOLD {
            partial.push(entry);
        }
    }

    let ats_score = if total_weighted > 0.0 {
        ((total_score / total_weighted) * 100.0).round().clamp(0.0, 100.0) as u8
    } else {
        0
    };

    let mut suggestions = vec![build_recommendation(ats_score, &gaps)];
    for gap in gaps.iter().take(3) {
        suggestions.push(format!(
            "Add concrete evidence of {}; the posting mentions it {} time(s).",
            gap.keyword, gap.frequency
        ));
    }
    for p in partial.iter().take(2) {
        suggestions.push(format!(
            "Mention {} in an experience bullet, not only in your skills list.",
            p.keyword
        ));
    }
    if !has_quantified_impact(resume_text) {
        suggestions.push(
            "Quantify your impact with numbers, percentages, or time saved.".to_string(),
        );
    }

    JobMatch {
        ats_score,
        suggestions,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Skill gap
// ────────────────────────────────────────────────────────────────────────────

/// Level assumed for any skill listed on the resume.
const CURRENT_SKILL_LEVEL: u8 = 7;

fn required_level(position_weight: f32) -> u8 {
    if position_weight >= TITLE_WEIGHT {
        9
    } else if position_weight >= REQUIRED_WEIGHT {
        8
    } else if position_weight >= RESPONSIBILITY_WEIGHT {
        7
    } else {
        5
    }
}

pub fn compute_skill_gap(current_skills: &[String], job_description: &str) -> SkillGapAnalysis {
    let inventory = keyword_inventory(job_description);

    let current = current_skills
        .iter()
        .map(|s| SkillLevel {
            skill: s.clone(),
            level: CURRENT_SKILL_LEVEL,
        })
        .collect();

    let required: Vec<SkillLevel> = inventory
        .iter()
        .map(|k| SkillLevel {
            skill: k.keyword.clone(),
            level: required_level(k.position_weight),
        })
        .collect();

    let mut covered_weight = 0.0_f32;
    let mut total_weight = 0.0_f32;
    let mut missing = Vec::new();
    for entry in &inventory {
        total_weight += entry.weighted_score;
        if current_skills.iter().any(|s| same_skill(s, &entry.keyword)) {
            covered_weight += entry.weighted_score;
        } else {
            missing.push(entry.keyword.clone());
        }
    }

    let match_percentage = if total_weight > 0.0 {
        ((covered_weight / total_weight) * 100.0).round().clamp(0.0, 100.0) as u8
    } else {
        0
    };

    SkillGapAnalysis {
        match_percentage,
        current_skills: current,
        required_skills: required,
        missing_skills: missing,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Learning path
// ────────────────────────────────────────────────────────────────────────────

const MAX_PATH_SKILLS: usize = 4;

pub fn build_learning_path(missing_skills: &[String], level: &str) -> LearningPath {
    // Days per task by level.
    let days_per_task: u32 = match level.to_lowercase().as_str() {
        "beginner" => 14,
        "advanced" => 3,
        _ => 7,
    };
    let task_duration = match days_per_task {
        14 => "2 weeks",
        3 => "3 days",
        _ => "1 week",
    };

    let focus: Vec<&String> = missing_skills.iter().take(MAX_PATH_SKILLS).collect();

    let tasks: Vec<LearningTask> = if focus.is_empty() {
        vec![LearningTask {
            id: 1,
            title: "Refresh your portfolio".to_string(),
            description: "No skill gaps detected. Add a recent project and quantified results to stay competitive."
                .to_string(),
            duration: task_duration.to_string(),
            kind: TaskType::Other,
            completed: false,
        }]
    } else {
        focus
            .iter()
            .enumerate()
            .flat_map(|(i, skill)| {
                let base = (i as u64) * 2;
                [
                    LearningTask {
                        id: base + 1,
                        title: format!("{skill} fundamentals"),
                        description: format!(
                            "Work through a structured {level} course covering the core of {skill}."
                        ),
                        duration: task_duration.to_string(),
                        kind: TaskType::Course,
                        completed: false,
                    },
                    LearningTask {
                        id: base + 2,
                        title: format!("Build something with {skill}"),
                        description: format!(
                            "Ship a small portfolio project that uses {skill} end to end and link it from your resume."
                        ),
                        duration: task_duration.to_string(),
                        kind: TaskType::Project,
                        completed: false,
                    },
                ]
            })
            .collect()
    };

    let total_days = days_per_task * tasks.len() as u32;
    let weeks = total_days.div_ceil(7);
    let duration = if weeks == 1 {
        "1 week".to_string()
    } else {
        format!("{weeks} weeks")
    };

    let title = if focus.is_empty() {
        "Stay sharp".to_string()
    } else {
        format!(
            "Path to {}",
            focus.iter().map(|s| s.as_str()).collect::<Vec<_>>().join(", ")
        )
    };

    LearningPath {
        title,
        duration,
        tasks,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Career DNA
// ────────────────────────────────────────────────────────────────────────────

fn archetype_for(dominant: Option<SkillCategory>, full_stack: bool) -> (&'static str, [&'static str; 3]) {
    if full_stack {
        return (
            "Full-Stack Builder",
            ["Full-Stack Engineer", "Senior Software Engineer", "Tech Lead"],
        );
    }
    match dominant {
        Some(Language) | Some(Backend) => (
            "Systems Builder",
            ["Backend Engineer", "Platform Engineer", "Software Architect"],
        ),
        Some(Frontend) => (
            "Interface Crafter",
            ["Frontend Engineer", "UI Engineer", "Design Systems Engineer"],
        ),
        Some(Data) => (
            "Insight Engineer",
            ["Data Engineer", "Analytics Engineer", "ML Engineer"],
        ),
        Some(Cloud) => (
            "Platform Guardian",
            ["DevOps Engineer", "Site Reliability Engineer", "Cloud Architect"],
        ),
        Some(Testing) => (
            "Quality Champion",
            ["QA Engineer", "SDET", "Test Automation Lead"],
        ),
        Some(Product) => (
            "Product Strategist",
            ["Senior Product Manager", "Group Product Manager", "Head of Product"],
        ),
        Some(Design) => (
            "Experience Designer",
            ["Product Designer", "UX Researcher", "Design Lead"],
        ),
        None => (
            "Versatile Generalist",
            ["Software Engineer", "Technical Program Manager", "Solutions Engineer"],
        ),
    }
}

fn career_stage(text: &str) -> &'static str {
    let years = YEARS_RE
        .captures_iter(text)
        .filter_map(|c| c.get(1)?.as_str().parse::<u32>().ok())
        .max();
    match years {
        None | Some(0..=1) => "Early Career",
        Some(2..=4) => "Mid-Level",
        Some(5..=9) => "Senior",
        Some(_) => "Principal",
    }
}

pub fn build_career_dna(processed: &ProcessedResumeData) -> CareerDna {
    let mut counts: BTreeMap<SkillCategory, usize> = BTreeMap::new();
    for s in &processed.skills {
        if let Some(known) = lookup(s) {
            *counts.entry(known.category).or_default() += 1;
        }
    }

    let mut ranked: Vec<(SkillCategory, usize)> = counts.iter().map(|(c, n)| (*c, *n)).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    let full_stack = counts.contains_key(&Frontend) && counts.contains_key(&Backend);
    let (archetype, roles) = archetype_for(ranked.first().map(|(c, _)| *c), full_stack);

    let strengths = ranked
        .iter()
        .take(3)
        .map(|(c, _)| c.label().to_string())
        .collect();
    let growth_areas = [Cloud, Testing, Data, Product]
        .into_iter()
        .filter(|c| !counts.contains_key(c))
        .take(3)
        .map(|c| c.label().to_string())
        .collect();

    CareerDna {
        archetype: archetype.to_string(),
        strengths,
        growth_areas,
        career_stage: career_stage(&processed.extracted_text).to_string(),
        recommended_roles: roles.iter().map(|r| r.to_string()).collect(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Interview questions
// ────────────────────────────────────────────────────────────────────────────

pub fn build_interview_questions(job_description: &str, skills: &[String]) -> Vec<String> {
    let inventory = keyword_inventory(job_description);
    let mut questions: Vec<String> = inventory
        .iter()
        .take(3)
        .map(|k| {
            format!(
                "Walk me through a project where you used {}. What trade-offs did you make?",
                k.keyword
            )
        })
        .collect();

    if let Some(missing) = inventory
        .iter()
        .find(|k| !skills.iter().any(|s| same_skill(s, &k.keyword)))
    {
        questions.push(format!(
            "This role relies on {}. How would you get productive with it in your first month?",
            missing.keyword
        ));
    }

    if let Some(extra) = skills
        .iter()
        .find(|s| !inventory.iter().any(|k| same_skill(s, &k.keyword)))
    {
        questions.push(format!(
            "Your resume highlights {extra}. How would that experience carry over to this role?"
        ));
    }

    if inventory.is_empty() {
        questions.push("What draws you to this role?".to_string());
    }
    questions.push(
        "Tell me about a time you disagreed with a teammate and how you resolved it.".to_string(),
    );
    questions.push(
        "Describe the project you are most proud of and your specific contribution.".to_string(),
    );
    questions
}

// ────────────────────────────────────────────────────────────────────────────
// Service impl
// ────────────────────────────────────────────────────────────────────────────

/// Pure-Rust, deterministic analysis. No network, never fails.
pub struct KeywordAnalyzer;

#[async_trait]
impl AnalysisService for KeywordAnalyzer {
    async fn parse(&self, text: &str) -> Result<ProcessedResumeData, AnalysisError> {
        Ok(parse_resume_text(text))
    }

    async fn match_job(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<JobMatch, AnalysisError> {
        Ok(compute_job_match(resume_text, job_description))
    }

    async fn skill_gap(
        &self,
        current_skills: &[String],
        job_description: &str,
    ) -> Result<SkillGapAnalysis, AnalysisError> {
        Ok(compute_skill_gap(current_skills, job_description))
    }

    async fn learning_path(
        &self,
        missing_skills: &[String],
        level: &str,
    ) -> Result<LearningPath, AnalysisError> {
        Ok(build_learning_path(missing_skills, level))
    }

    async fn career_profile(
        &self,
        processed: &ProcessedResumeData,
    ) -> Result<CareerDna, AnalysisError> {
        Ok(build_career_dna(processed))
    }

    async fn interview_questions(
        &self,
        job_description: &str,
        skills: &[String],
    ) -> Result<Vec<String>, AnalysisError> {
        Ok(build_interview_questions(job_description, skills))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intake::fixtures::{PDF_FIXTURE, WORD_FIXTURE};

    const BACKEND_JD: &str = "Senior Backend Engineer (Rust)
We build payment infrastructure for small businesses.
Requirements:
- 5+ years of Rust or Go
- Deep PostgreSQL experience
- Kubernetes in production
Nice to have: Kafka, Terraform
About us: a remote-first team of 40.";

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_count_term_respects_word_boundaries() {
        assert_eq!(count_term("Java and JavaScript", "Java"), 1);
        assert_eq!(count_term("PostgreSQL, MySQL and SQL", "SQL"), 1);
        assert_eq!(count_term("C++ and C#", "C++"), 1);
        assert_eq!(count_term("we go fast with Go", "Go"), 1);
        assert_eq!(count_term("React.js, react", "React"), 2);
    }

    #[test]
    fn test_alias_mentions_do_not_double_count() {
        let node = lookup("Node.js").unwrap();
        assert_eq!(mentions("Built services in Node.js", node), 1);
        assert_eq!(mentions("node tooling", node), 1);
    }

    #[test]
    fn test_inventory_weights_by_position() {
        let inventory = keyword_inventory(BACKEND_JD);
        let weight = |kw: &str| {
            inventory
                .iter()
                .find(|k| k.keyword == kw)
                .map(|k| k.position_weight)
                .unwrap()
        };
        assert_eq!(weight("Rust"), TITLE_WEIGHT);
        assert_eq!(weight("PostgreSQL"), REQUIRED_WEIGHT);
        assert_eq!(weight("Kafka"), NICE_TO_HAVE_WEIGHT);
        assert_eq!(inventory[0].keyword, "Rust", "strongest keyword first");
        for k in &inventory {
            assert!((k.weighted_score - k.frequency as f32 * k.position_weight).abs() < f32::EPSILON);
        }
    }

    #[test]
    fn test_parse_minimal_plain_text() {
        let parsed = parse_resume_text("Jane Doe\njane@x.com");
        assert_eq!(parsed.personal_info.name, "Jane Doe");
        assert_eq!(parsed.personal_info.email, "jane@x.com");
        assert!(parsed.personal_info.phone.is_empty());
        assert!(parsed.skills.is_empty());
        assert_eq!(parsed.extracted_text, "Jane Doe\njane@x.com");
    }

    #[test]
    fn test_dates_are_not_phone_numbers() {
        let text = "Jane Doe\njane@x.com\nUniversity of Washington | 2015 - 2019\nGPA 3.8\n2021\n2022";
        assert!(parse_resume_text(text).personal_info.phone.is_empty());

        let with_phone = format!("{text}\nPhone: 206-555-0199");
        assert_eq!(parse_resume_text(&with_phone).personal_info.phone, "206-555-0199");
    }

    #[test]
    fn test_parse_pdf_fixture() {
        let parsed = parse_resume_text(PDF_FIXTURE);
        let info = &parsed.personal_info;
        assert_eq!(info.name, "Ananya Rao");
        assert_eq!(info.email, "ananya.rao@example.com");
        assert_eq!(info.phone, "+1-555-0142");
        assert_eq!(info.location, "Seattle, WA");
        assert_eq!(info.linkedin, "linkedin.com/in/ananyarao");
        assert!(parsed.summary.starts_with("Software engineer with 5 years"));
        assert_eq!(parsed.skills[0], "React", "ordered by first mention");
        for expected in ["TypeScript", "PostgreSQL", "Kubernetes", "Jest"] {
            assert!(parsed.skills.iter().any(|s| s == expected), "missing {expected}");
        }
    }

    #[test]
    fn test_parse_word_fixture_finds_product_skills() {
        let parsed = parse_resume_text(WORD_FIXTURE);
        assert_eq!(parsed.personal_info.name, "Marcus Okafor");
        assert!(parsed.skills.iter().any(|s| s == "User Research"));
        assert!(parsed.skills.iter().any(|s| s == "Figma"));
    }

    #[test]
    fn test_job_match_full_coverage_scores_strong() {
        let resume = "Rust Rust PostgreSQL PostgreSQL Kubernetes Kubernetes Go Go Kafka Kafka \
                      Terraform Terraform, cut costs by 30%";
        let result = compute_job_match(resume, BACKEND_JD);
        assert_eq!(result.ats_score, 100);
        assert!(result.suggestions[0].contains("Strong match"));
    }

    #[test]
    fn test_job_match_no_coverage_lists_gaps() {
        let result = compute_job_match("I like painting", BACKEND_JD);
        assert_eq!(result.ats_score, 0);
        assert!(result.suggestions[0].contains("Low match (0/100)"));
        assert!(result.suggestions.iter().any(|s| s.contains("Add concrete evidence of Rust")));
        assert!(result
            .suggestions
            .iter()
            .any(|s| s.contains("Quantify your impact")));
    }

    #[test]
    fn test_job_match_single_mention_is_partial() {
        let result = compute_job_match("Rust", "Rust Engineer");
        assert_eq!(result.ats_score, 60);
        assert!(result
            .suggestions
            .iter()
            .any(|s| s.contains("Mention Rust in an experience bullet")));
    }

    #[test]
    fn test_job_match_empty_inventory_scores_zero() {
        let result = compute_job_match("Rust", "We are hiring!");
        assert_eq!(result.ats_score, 0);
        assert_eq!(result.suggestions.len(), 1);
    }

    #[test]
    fn test_skill_gap_missing_and_percentage() {
        let gap = compute_skill_gap(&strings(&["rust", "Postgres", "Figma"]), BACKEND_JD);
        assert!(gap.missing_skills.contains(&"Kubernetes".to_string()));
        assert!(!gap.missing_skills.contains(&"Rust".to_string()));
        assert!(!gap.missing_skills.contains(&"PostgreSQL".to_string()), "alias match");
        assert!(gap.match_percentage > 0 && gap.match_percentage < 100);
        assert_eq!(gap.current_skills.len(), 3);
        assert!(gap.required_skills.iter().all(|s| s.level <= 10));
    }

    #[test]
    fn test_skill_gap_empty_description() {
        let gap = compute_skill_gap(&strings(&["Rust"]), "");
        assert_eq!(gap.match_percentage, 0);
        assert!(gap.required_skills.is_empty());
        assert!(gap.missing_skills.is_empty());
    }

    #[test]
    fn test_learning_path_two_tasks_per_skill() {
        let path = build_learning_path(&strings(&["Kafka", "Terraform"]), "intermediate");
        assert_eq!(path.tasks.len(), 4);
        assert_eq!(path.duration, "4 weeks");
        assert_eq!(path.title, "Path to Kafka, Terraform");
        let ids: Vec<u64> = path.tasks.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(path.tasks[0].kind, TaskType::Course);
        assert_eq!(path.tasks[1].kind, TaskType::Project);
        assert!(path.tasks.iter().all(|t| !t.completed));
    }

    #[test]
    fn test_learning_path_caps_focus_and_handles_no_gaps() {
        let many = strings(&["A1", "B2", "C3", "D4", "E5", "F6"]);
        assert_eq!(build_learning_path(&many, "advanced").tasks.len(), 8);

        let none = build_learning_path(&[], "beginner");
        assert_eq!(none.tasks.len(), 1);
        assert_eq!(none.tasks[0].kind, TaskType::Other);
        assert_eq!(none.duration, "2 weeks");
    }

    #[test]
    fn test_career_dna_full_stack_from_fixture() {
        let dna = build_career_dna(&parse_resume_text(PDF_FIXTURE));
        assert_eq!(dna.archetype, "Full-Stack Builder");
        assert_eq!(dna.career_stage, "Senior");
        assert_eq!(dna.recommended_roles.len(), 3);
        assert!(!dna.strengths.is_empty());
        assert!(dna.growth_areas.iter().any(|g| g == "Product management"));
    }

    #[test]
    fn test_career_dna_without_skills() {
        let dna = build_career_dna(&ProcessedResumeData::default());
        assert_eq!(dna.archetype, "Versatile Generalist");
        assert_eq!(dna.career_stage, "Early Career");
        assert!(dna.strengths.is_empty());
        assert_eq!(dna.growth_areas.len(), 3);
    }

    #[test]
    fn test_interview_questions_cover_keywords_and_gaps() {
        let questions = build_interview_questions(BACKEND_JD, &strings(&["Rust", "React"]));
        assert!(questions[0].contains("Rust"));
        assert!(questions.iter().any(|q| q.contains("first month")));
        assert!(questions.iter().any(|q| q.contains("Your resume highlights React")));
        assert!(questions.len() >= 5);
    }

    #[tokio::test]
    async fn test_keyword_analyzer_never_fails() {
        let analyzer = KeywordAnalyzer;
        let processed = analyzer.parse("").await.unwrap();
        assert!(processed.personal_info.name.is_empty());
        assert!(analyzer.match_job("", "").await.is_ok());
        assert!(analyzer.interview_questions("", &[]).await.unwrap().len() >= 2);
    }
}
