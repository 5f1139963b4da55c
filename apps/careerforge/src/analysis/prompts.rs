// LLM prompt constants for the analysis backend.
// Each template carries `{placeholders}` replaced by `LlmAnalyzer` before sending.

/// System prompt shared by every analysis call.
pub const ANALYSIS_SYSTEM: &str = "You are an expert career coach and technical recruiter. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON value. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Replace `{resume_text}`.
pub const PARSE_PROMPT_TEMPLATE: &str = r#"Extract structured data from the resume text below.

Return a JSON object with this EXACT schema:
{
  "personalInfo": {
    "name": "", "email": "", "phone": "", "location": "", "linkedin": "", "website": ""
  },
  "summary": "",
  "skills": ["React", "Node.js"]
}

Use empty strings for anything the resume does not state. List skills in the order they first appear.

RESUME:
{resume_text}"#;

/// Replace `{resume_text}` and `{job_description}`.
pub const JOB_MATCH_PROMPT_TEMPLATE: &str = r#"Score how well this resume would pass an applicant tracking system for the job below.

Return a JSON object with this EXACT schema:
{
  "atsScore": 72,
  "suggestions": ["Add evidence of Kubernetes in production"]
}

atsScore is an integer from 0 to 100. Give 3 to 6 concrete, actionable suggestions.

RESUME:
{resume_text}

JOB DESCRIPTION:
{job_description}"#;

/// Replace `{skills_json}` and `{job_description}`.
pub const SKILL_GAP_PROMPT_TEMPLATE: &str = r#"Compare the candidate's skills with the job requirements.

Return a JSON object with this EXACT schema:
{
  "matchPercentage": 65,
  "currentSkills": [{"skill": "React", "level": 8}],
  "requiredSkills": [{"skill": "React", "level": 9}],
  "missingSkills": ["GraphQL"]
}

Levels are integers from 0 to 10. matchPercentage is an integer from 0 to 100.
missingSkills lists required skills the candidate does not have.

CANDIDATE SKILLS:
{skills_json}

JOB DESCRIPTION:
{job_description}"#;

/// Replace `{skills_json}` and `{level}`.
pub const LEARNING_PATH_PROMPT_TEMPLATE: &str = r#"Design a {level} learning path that closes these skill gaps.

Return a JSON object with this EXACT schema:
{
  "title": "Path to GraphQL",
  "duration": "4 weeks",
  "tasks": [
    {"id": 1, "title": "", "description": "", "duration": "1 week", "type": "course"}
  ]
}

type is one of "course" or "project". Task ids are distinct positive integers.

MISSING SKILLS:
{skills_json}"#;

/// Replace `{resume_json}`.
pub const CAREER_DNA_PROMPT_TEMPLATE: &str = r#"Build a career profile for this candidate.

Return a JSON object with this EXACT schema:
{
  "archetype": "Full-Stack Builder",
  "strengths": [""],
  "growthAreas": [""],
  "careerStage": "Mid-Level",
  "recommendedRoles": [""]
}

CANDIDATE:
{resume_json}"#;

/// Replace `{skills_json}` and `{job_description}`.
pub const INTERVIEW_PROMPT_TEMPLATE: &str = r#"Write 5 to 8 interview questions this candidate is likely to face for the job below.
Mix technical questions on the required skills with behavioral questions.

Return a JSON array of strings.

CANDIDATE SKILLS:
{skills_json}

JOB DESCRIPTION:
{job_description}"#;
