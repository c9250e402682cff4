// src/form.rs
//! Multi-section job-application form: personal info, education, experience,
//! capped skill selection, file uploads, and multipart payload composition.
//!
//! Validation is derived, not imperative: [`ApplicationForm::can_submit`] is
//! a pure function of current state, and the size/cap guards run at the
//! point of user action so invalid data never reaches the network layer.

use anyhow::Result;
use chrono::NaiveDate;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};

use crate::api::JobsClient;
use crate::types::SubmitOutcome;

pub const MAX_RESUME_BYTES: usize = 2 * 1024 * 1024;
pub const MAX_ATTACH_TOTAL_BYTES: usize = 50 * 1024 * 1024;
pub const MAX_ATTACHMENT_FILES: usize = 20;
pub const MAX_SKILLS: usize = 8;
pub const MAX_EDUCATION_ENTRIES: usize = 5;
pub const MAX_EXPERIENCE_ENTRIES: usize = 20;

pub const PHONE_COUNTRY_CODES: &[(&str, &str)] = &[
    ("+66", "Thailand"),
    ("+86", "China"),
    ("+62", "Indonesia"),
    ("+63", "Philippines"),
    ("+84", "Vietnam"),
    ("+55", "Brazil"),
    ("+52", "Mexico"),
    ("+966", "Saudi Arabia"),
    ("+971", "UAE"),
];

pub const RESIDENCE_COUNTRIES: &[&str] = &[
    "Thailand",
    "China",
    "Indonesia",
    "Philippines",
    "Vietnam",
    "Brazil",
    "Mexico",
    "Saudi Arabia",
    "United Arab Emirates (Dubai)",
    "Other",
];

pub const EDUCATION_LEVELS: &[&str] = &[
    "Secondary School / High School",
    "Vocational Certificate (Voc. Cert.)",
    "Higher Vocational Certificate (High Voc. Cert.)",
    "Diploma / Associate Degree",
    "Bachelor's Degree",
    "Master's Degree",
    "Doctoral Degree (PhD / DBA / EdD)",
    "Currently Studying",
    "Incomplete / Did Not Graduate",
    "Other / Equivalent",
];

const SKILL_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "Office & Productivity",
        &[
            "Excel",
            "Google Sheets",
            "PowerPoint",
            "Word",
            "Data Entry",
            "Documentation",
            "Reporting",
            "Presentation",
            "Email Communication",
            "Calendar & Scheduling",
        ],
    ),
    (
        "Customer & Operations",
        &[
            "Customer Service",
            "Sales Support",
            "Operations",
            "Process Improvement",
            "Logistics",
            "Inventory Management",
            "Order Management",
            "Vendor Management",
            "Quality Assurance",
            "Problem Solving",
        ],
    ),
    (
        "Data & Analytics",
        &[
            "Data Analytics",
            "SQL",
            "Python",
            "Power BI",
            "Tableau",
            "Google Looker Studio",
            "A/B Testing",
            "Forecasting",
            "Dashboarding",
            "KPI Tracking",
        ],
    ),
    (
        "Engineering",
        &[
            "JavaScript",
            "TypeScript",
            "React",
            "Next.js",
            "Node.js",
            "REST APIs",
            "Git",
            "Testing",
            "CI/CD",
            "System Design",
        ],
    ),
    (
        "Business & Leadership",
        &[
            "Project Management",
            "Stakeholder Management",
            "Communication",
            "Leadership",
            "Teamwork",
            "Time Management",
            "Negotiation",
            "Public Speaking",
            "Business Analysis",
            "Strategy",
        ],
    ),
    (
        "E-commerce & Marketing",
        &[
            "E-commerce",
            "Shopee",
            "Lazada",
            "TikTok Shop",
            "Product Listing",
            "Ads Optimization",
            "SEO",
            "Content Writing",
            "Social Media",
            "Campaign Planning",
        ],
    ),
];

/// Tab + search view over the skill categories.
pub struct SkillCatalog;

impl SkillCatalog {
    pub fn categories() -> Vec<&'static str> {
        SKILL_CATEGORIES.iter().map(|(name, _)| *name).collect()
    }

    pub fn items(category: &str) -> &'static [&'static str] {
        SKILL_CATEGORIES
            .iter()
            .find(|(name, _)| *name == category)
            .map(|(_, items)| *items)
            .unwrap_or(&[])
    }

    /// Suggestions for the current tab plus live substring hits across all
    /// categories, deduplicated.
    pub fn suggestions(tab: &str, query: &str) -> Vec<&'static str> {
        let q = query.trim().to_lowercase();
        let tab_items = Self::items(tab);

        let mut out: Vec<&'static str> = if q.is_empty() {
            tab_items.to_vec()
        } else {
            tab_items
                .iter()
                .copied()
                .filter(|s| s.to_lowercase().contains(&q))
                .collect()
        };

        if !q.is_empty() {
            for (_, items) in SKILL_CATEGORIES {
                for s in items.iter().copied() {
                    if s.to_lowercase().contains(&q) && !out.contains(&s) {
                        out.push(s);
                    }
                }
            }
        }
        out
    }
}

/// A file selected for upload, held in memory so size guards run at select
/// time rather than submit time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePayload {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl FilePayload {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub level: String,
    pub school: String,
    pub from: String,
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl EducationEntry {
    pub fn is_empty(&self) -> bool {
        self.level.is_empty() && self.school.is_empty() && self.from.is_empty() && self.to.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub company: String,
    pub title: String,
    pub from: String,
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl ExperienceEntry {
    pub fn is_empty(&self) -> bool {
        self.company.is_empty() && self.title.is_empty() && self.from.is_empty() && self.to.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct ApplicationForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_code: String,
    pub phone_number: String,
    pub residence_country: String,
    pub residence_country_other: String,
    pub address_detail: String,
    pub education: Vec<EducationEntry>,
    pub experience: Vec<ExperienceEntry>,
    pub skills: Vec<String>,
    pub visa_required: bool,
    pub available_start_date: Option<NaiveDate>,
    pub website_url: String,
    pub source_channel: String,
    pub terms_accepted: bool,
    pub resume: Option<FilePayload>,
    pub attachments: Vec<FilePayload>,
}

impl Default for ApplicationForm {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            phone_code: "+66".to_string(),
            phone_number: String::new(),
            residence_country: "Thailand".to_string(),
            residence_country_other: String::new(),
            address_detail: String::new(),
            education: vec![EducationEntry::default()],
            experience: vec![ExperienceEntry::default()],
            skills: Vec::new(),
            visa_required: false,
            available_start_date: None,
            website_url: String::new(),
            source_channel: String::new(),
            terms_accepted: false,
            resume: None,
            attachments: Vec::new(),
        }
    }
}

pub fn normalize_phone_number(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

impl ApplicationForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Composed wire phone: country code + digits-only number.
    pub fn full_phone(&self) -> String {
        let digits = normalize_phone_number(&self.phone_number);
        if digits.is_empty() {
            self.phone_code.clone()
        } else {
            format!("{} {}", self.phone_code, digits)
        }
    }

    fn country_label(&self) -> String {
        if self.residence_country == "Other" {
            let other = self.residence_country_other.trim();
            if other.is_empty() {
                "Other".to_string()
            } else {
                other.to_string()
            }
        } else {
            self.residence_country.clone()
        }
    }

    /// Composed wire address: country plus optional free-text detail.
    pub fn address_combined(&self) -> String {
        let detail = self.address_detail.trim();
        if detail.is_empty() {
            self.country_label()
        } else {
            format!("{} - {}", self.country_label(), detail)
        }
    }

    /// Toggle a skill pick. Selecting past the cap is a no-op, not an error.
    pub fn toggle_skill(&mut self, skill: &str) {
        let clean = skill.trim();
        if clean.is_empty() {
            return;
        }
        if let Some(pos) = self.skills.iter().position(|s| s == clean) {
            self.skills.remove(pos);
            return;
        }
        if self.skills.len() >= MAX_SKILLS {
            return;
        }
        self.skills.push(clean.to_string());
    }

    /// Free-text skill entry; same cap and case-sensitive dedup as picks.
    pub fn add_custom_skill(&mut self, skill: &str) {
        let clean = skill.trim();
        if clean.is_empty() || self.skills.iter().any(|s| s == clean) {
            return;
        }
        if self.skills.len() >= MAX_SKILLS {
            return;
        }
        self.skills.push(clean.to_string());
    }

    pub fn remove_skill(&mut self, skill: &str) {
        self.skills.retain(|s| s != skill);
    }

    /// Checked at file-select time; rejection leaves the stored resume
    /// untouched so the inline error can be shown and retried.
    pub fn set_resume(&mut self, file: FilePayload) -> Result<()> {
        if file.size() > MAX_RESUME_BYTES {
            anyhow::bail!(
                "Resume file must be <= {}MB",
                MAX_RESUME_BYTES / 1024 / 1024
            );
        }
        self.resume = Some(file);
        Ok(())
    }

    pub fn clear_resume(&mut self) {
        self.resume = None;
    }

    /// Add a batch of attachments. The combined size (existing plus
    /// incoming) must stay under the limit or the whole batch is rejected;
    /// files are never partially accepted. Duplicates (same name and size)
    /// are collapsed.
    pub fn add_attachments(&mut self, files: Vec<FilePayload>) -> Result<()> {
        let existing: usize = self.attachments.iter().map(FilePayload::size).sum();
        let incoming: usize = files.iter().map(FilePayload::size).sum();
        if existing + incoming > MAX_ATTACH_TOTAL_BYTES {
            anyhow::bail!(
                "Total file size exceeds {}MB",
                MAX_ATTACH_TOTAL_BYTES / 1024 / 1024
            );
        }

        for file in files {
            let dup = self
                .attachments
                .iter()
                .any(|f| f.name == file.name && f.size() == file.size());
            if !dup {
                self.attachments.push(file);
            }
        }
        self.attachments.truncate(MAX_ATTACHMENT_FILES);
        Ok(())
    }

    pub fn remove_attachment(&mut self, name: &str) {
        self.attachments.retain(|f| f.name != name);
    }

    pub fn add_education_entry(&mut self) {
        if self.education.len() < MAX_EDUCATION_ENTRIES {
            self.education.push(EducationEntry::default());
        }
    }

    pub fn add_experience_entry(&mut self) {
        if self.experience.len() < MAX_EXPERIENCE_ENTRIES {
            self.experience.push(ExperienceEntry::default());
        }
    }

    fn residence_ok(&self) -> bool {
        if self.residence_country == "Other" {
            !self.residence_country_other.trim().is_empty()
        } else {
            !self.residence_country.trim().is_empty()
        }
    }

    /// Pure derived gate over the required fields; recomputed on every
    /// relevant state change, never stored.
    pub fn can_submit(&self) -> bool {
        !self.first_name.trim().is_empty()
            && !self.last_name.trim().is_empty()
            && !self.email.trim().is_empty()
            && !normalize_phone_number(&self.phone_number).is_empty()
            && self.residence_ok()
            && !self.source_channel.trim().is_empty()
            && self.terms_accepted
            && self.resume.is_some()
    }

    /// Compose the multipart payload: scalar fields, JSON-encoded
    /// sub-structures with all-empty entries filtered out, and the files.
    pub fn build_payload(&self) -> Result<ApplicationPayload> {
        let resume = self
            .resume
            .clone()
            .ok_or_else(|| anyhow::anyhow!("Resume file is required"))?;

        let education: Vec<&EducationEntry> =
            self.education.iter().filter(|e| !e.is_empty()).collect();
        let experience: Vec<&ExperienceEntry> =
            self.experience.iter().filter(|e| !e.is_empty()).collect();

        let fields = vec![
            ("first_name", self.first_name.trim().to_string()),
            ("last_name", self.last_name.trim().to_string()),
            ("email", self.email.trim().to_string()),
            ("phone", self.full_phone()),
            ("address", self.address_combined()),
            (
                "visa_required",
                if self.visa_required { "Yes" } else { "No" }.to_string(),
            ),
            (
                "available_start_date",
                self.available_start_date
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_default(),
            ),
            ("website_url", self.website_url.trim().to_string()),
            ("source_channel", self.source_channel.trim().to_string()),
            (
                "terms_accepted",
                if self.terms_accepted { "true" } else { "false" }.to_string(),
            ),
            ("skills", serde_json::to_string(&self.skills)?),
            ("education_json", serde_json::to_string(&education)?),
            ("experience_json", serde_json::to_string(&experience)?),
        ];

        Ok(ApplicationPayload {
            fields,
            resume,
            attachments: self.attachments.clone(),
        })
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Fully composed submission payload, ready to turn into multipart form
/// data.
#[derive(Debug, Clone)]
pub struct ApplicationPayload {
    pub fields: Vec<(&'static str, String)>,
    pub resume: FilePayload,
    pub attachments: Vec<FilePayload>,
}

impl ApplicationPayload {
    pub fn into_form(self) -> Form {
        let mut form = Form::new();
        for (key, value) in self.fields {
            form = form.text(key, value);
        }
        form = form.part(
            "resume",
            Part::bytes(self.resume.bytes).file_name(self.resume.name),
        );
        for file in self.attachments {
            form = form.part("attachments", Part::bytes(file.bytes).file_name(file.name));
        }
        form
    }
}

/// One form session: `Editing -> Submitting -> Succeeded | Failed`. Success
/// clears the form for a fresh application; failure keeps it populated and
/// editable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPhase {
    Editing,
    Submitting,
    Succeeded,
    Failed(String),
}

pub struct FormSession {
    pub form: ApplicationForm,
    pub phase: FormPhase,
    pub last_outcome: Option<SubmitOutcome>,
}

impl Default for FormSession {
    fn default() -> Self {
        Self::new()
    }
}

impl FormSession {
    pub fn new() -> Self {
        Self {
            form: ApplicationForm::new(),
            phase: FormPhase::Editing,
            last_outcome: None,
        }
    }

    /// Drive one submission. HTTP rejection and transport failure both land
    /// in `Failed` with an inline message; the form stays editable either
    /// way.
    pub async fn submit(&mut self, client: &JobsClient, job_id: &str) -> Result<()> {
        if !self.form.can_submit() {
            anyhow::bail!("Required fields are missing");
        }

        let payload = self.form.build_payload()?;
        self.phase = FormPhase::Submitting;

        match client.submit_application(job_id, payload).await {
            Ok(outcome) if outcome.ok => {
                self.last_outcome = Some(outcome);
                self.phase = FormPhase::Succeeded;
                self.form.reset();
            }
            Ok(outcome) => {
                let message = outcome
                    .message
                    .clone()
                    .unwrap_or_else(|| "Submit failed".to_string());
                self.last_outcome = Some(outcome);
                self.phase = FormPhase::Failed(message);
            }
            Err(e) => {
                self.last_outcome = None;
                self.phase = FormPhase::Failed(e.to_string());
            }
        }
        Ok(())
    }
}
