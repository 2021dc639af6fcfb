//! Sample postings written into an empty jobs table.
//!
//! Skills are taken from each posting's must-have list, so seeding works
//! without the AI collaborator.

use careers_core::job::{ApplicationType, JobDraft, NewJob};

const SEED_AUTHOR: &str = "admin@example.com";

fn strings(values: &[&str]) -> Vec<String> {
  values.iter().map(|v| (*v).to_owned()).collect()
}

fn drafts() -> Vec<JobDraft> {
  vec![
    JobDraft {
      title:            "Senior Frontend Developer".into(),
      company:          "Analyzed".into(),
      location:         "Remote".into(),
      description:      "We are looking for an experienced Frontend Developer to \
                         join our team. You will be responsible for building the \
                         client side of our web applications, translating company \
                         and customer needs into functional and appealing \
                         interactive applications."
        .into(),
      responsibilities: strings(&[
        "Develop new user-facing features",
        "Build reusable code and libraries for future use",
        "Ensure the technical feasibility of UI/UX designs",
        "Optimize application for maximum speed and scalability",
      ]),
      must_have_skills: strings(&["React", "TypeScript", "Next.js"]),
      industry_type:    "Technology, Information and Media".into(),
      department:       "Engineering".into(),
      employment_type:  "Full Time, Permanent".into(),
      role_category:    "Software Development".into(),
      education:        "UG: Any Graduate".into(),
      tags:             strings(&["React", "TypeScript", "Next.js", "TailwindCSS"]),
      application_type: Some(ApplicationType::Link),
      apply_link:       Some("https://careers.analyzed.example/frontend".into()),
    },
    JobDraft {
      title:            "UX/UI Designer".into(),
      company:          "Analyzed".into(),
      location:         "Hybrid".into(),
      description:      "We are seeking a talented UX/UI Designer to create amazing \
                         user experiences. The ideal candidate has an eye for clean \
                         and artful design and can translate high-level \
                         requirements into interaction flows and artifacts."
        .into(),
      responsibilities: strings(&[
        "Gather and evaluate user requirements with product managers and engineers",
        "Illustrate design ideas using storyboards, process flows and sitemaps",
        "Design graphical user interface elements such as menus, tabs and widgets",
        "Develop UI mockups and prototypes",
      ]),
      must_have_skills: strings(&["Figma", "Adobe XD"]),
      industry_type:    "Technology, Information and Media".into(),
      department:       "Design".into(),
      employment_type:  "Full Time, Permanent".into(),
      role_category:    "UX & Design".into(),
      education:        "UG: Any Graduate in Design".into(),
      tags:             strings(&["Figma", "UX", "UI", "Prototyping"]),
      application_type: Some(ApplicationType::Form),
      apply_link:       None,
    },
  ]
}

/// The sample postings, validated like any admin submission.
pub fn sample_jobs() -> careers_core::Result<Vec<NewJob>> {
  drafts()
    .into_iter()
    .map(|draft| {
      let content = draft.validate()?;
      Ok(NewJob {
        skills: content.must_have_skills.clone(),
        content,
        created_by: SEED_AUTHOR.to_owned(),
      })
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn samples_pass_validation() {
    let jobs = sample_jobs().unwrap();
    assert_eq!(jobs.len(), 2);
    assert!(jobs.iter().all(|j| !j.skills.is_empty()));
  }
}
