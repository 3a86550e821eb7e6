//! Built-in profile. Every value here can be overridden from the config file.

pub const NAME: &str = "Harshvardhan Singh";
pub const TAGLINE: &str = "Engineer. Analyst. Integrator  • Bridging Tech and Operations  • Solving. Analyzing. Building";
pub const GITHUB_USERNAME: &str = "harshvar36";
pub const LINKEDIN_URL: &str = "https://www.linkedin.com/in/harshvardhan-singh-508a18319/";
pub const EMAIL: &str = "harshva36@gmail.com";
pub const RESUME_URL: &str =
    "https://drive.google.com/file/d/1LnTMMF7oAcGmyoKzEqvUbTy4Qs9jgUn6/view?usp=drive_link";
pub const AVATAR: &str = "harshvardhan.JPG";

/// Repository names pinned to the featured grid. Must match GitHub names exactly.
pub const FEATURED: &[&str] = &["streamlit-iris-app-aiml"];

pub const ABOUT: &[&str] = &[
    "I am an engineer driven by a fundamental curiosity for how systems work, from cutting-edge wireless networks to complex operational workflows.",
    "My experience is uniquely broad, spanning from theoretical research in Reconfigurable Intelligent Surfaces (RIS) to practical data analysis for maritime crew management.",
    "I thrive at the intersection of innovation, data, and operations. Whether it's optimizing a system, analyzing a dataset, or exploring a new technology, I am a persistent problem-solver who builds bridges between an idea and its real-world execution.",
];

pub const INTERESTS: &[&str] = &[
    "Innovation",
    "AI/ML",
    "Data Analysis",
    "DevOps",
    "Cloud Computing",
    "Wireless Communications",
    "Systems Design",
    "Operational Efficiency",
];

pub const HIGHLIGHTS: &[&str] = &[
    "Data-Driven Operational Analysis",
    "DevOps basics: GitHub Actions, Docker (learning)",
    "Versatile Cross-Domain Experience",
];

pub const API_BASE: &str = "https://api.github.com";
pub const REQUEST_TIMEOUT: &str = "30s";

pub(crate) fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}
