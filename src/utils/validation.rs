use validator::ValidationError;

pub const EDUCATIONAL_LEVELS: [&str; 7] = [
    "Primary",
    "Secondary",
    "High School",
    "Vocational",
    "Bachelor's Degree",
    "Master's Degree",
    "Doctorate",
];

pub const JOB_POSITIONS: [&str; 9] = [
    "Frontend Developer",
    "Backend Developer",
    "Full-stack Developer",
    "Mobile Developer",
    "DevOps Engineer",
    "Data Scientist",
    "QA Engineer",
    "Product Manager",
    "UX Designer",
];

pub const PROGRAMMING_LANGUAGES: [&str; 12] = [
    "JavaScript",
    "TypeScript",
    "Python",
    "Rust",
    "Go",
    "Java",
    "C#",
    "C++",
    "PHP",
    "Ruby",
    "Kotlin",
    "Swift",
];

/// Listing links and images must be absolute https URLs.
pub fn validate_secure_url(raw: &str) -> Result<(), ValidationError> {
    let parsed = url::Url::parse(raw).map_err(|_| invalid("url", "Must be a valid URL"))?;
    if parsed.scheme() != "https" {
        return Err(invalid("url_scheme", "URL must start with 'https://'"));
    }
    Ok(())
}

pub fn validate_educational_level(value: &str) -> Result<(), ValidationError> {
    one_of(value, &EDUCATIONAL_LEVELS, "educational_level")
}

pub fn validate_job_position(value: &str) -> Result<(), ValidationError> {
    one_of(value, &JOB_POSITIONS, "job_position")
}

pub fn validate_programming_language(value: &str) -> Result<(), ValidationError> {
    one_of(value, &PROGRAMMING_LANGUAGES, "programming_language")
}

fn one_of(value: &str, allowed: &[&str], code: &'static str) -> Result<(), ValidationError> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(invalid(code, "Value is not one of the accepted options"))
    }
}

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}
