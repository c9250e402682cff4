// src/mock.rs
//! Static dataset served when no backend base URL is configured.

use crate::types::{Job, JobStatus};

pub fn mock_jobs() -> Vec<Job> {
    vec![
        Job {
            job_id: "SHD-TH-OPS-LEAD-001".to_string(),
            title: "CS Team Lead (Shopee)".to_string(),
            department: "Operations".to_string(),
            level: "Experienced".to_string(),
            country: "Thailand".to_string(),
            city: Some("Bangkok".to_string()),
            location: "Bangkok, Thailand".to_string(),
            description: "Lead and coach the customer service team to deliver excellent \
                          customer experience. Manage KPIs, quality, and escalation handling."
                .to_string(),
            qualifications: "3+ years in customer service operations. Strong leadership and \
                             communication skills. Familiar with e-commerce is a plus."
                .to_string(),
            responsibilities: Some(
                "Manage daily operations, coach agents, monitor performance metrics, and \
                 drive continuous improvement."
                    .to_string(),
            ),
            benefits: Some(
                "Competitive compensation, health benefits, learning budget, and global \
                 growth opportunities."
                    .to_string(),
            ),
            status: JobStatus::Published,
            ..Default::default()
        },
        Job {
            job_id: "SHD-PH-CS-SENIOR-002".to_string(),
            title: "Customer Service Supervisor".to_string(),
            department: "Customer Service".to_string(),
            level: "Senior".to_string(),
            country: "Philippines".to_string(),
            city: Some("Manila".to_string()),
            location: "Manila, Philippines".to_string(),
            description: "Supervise CS operations, ensure service levels, and coordinate \
                          cross-functional teams for issue resolution."
                .to_string(),
            qualifications: "2+ years as team supervisor. Strong analytical skills and \
                             stakeholder management."
                .to_string(),
            status: JobStatus::Published,
            ..Default::default()
        },
        Job {
            job_id: "SHD-VN-ENG-JUNIOR-003".to_string(),
            title: "Frontend Engineer".to_string(),
            department: "Engineering and Technology".to_string(),
            level: "Entry Level".to_string(),
            country: "Vietnam".to_string(),
            city: Some("Ho Chi Minh City".to_string()),
            location: "Ho Chi Minh City, Vietnam".to_string(),
            description: "Build responsive web experiences. Work with product and design to \
                          ship features quickly and reliably."
                .to_string(),
            qualifications: "React/TypeScript experience. Good fundamentals in HTML/CSS. \
                             Bonus: Next.js, TailwindCSS."
                .to_string(),
            status: JobStatus::Published,
            ..Default::default()
        },
    ]
}
