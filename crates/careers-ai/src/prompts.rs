//! Prompt templates and the `{{name}}` placeholder renderer.

/// Appended to every prompt; the endpoint is also told to emit JSON, but
/// naming the keys keeps the model on the expected shape.
pub const JSON_ONLY: &str = "Respond with a single JSON object only, with no \
  surrounding prose and no markdown code fences.";

pub const SUGGEST_JOB_DESCRIPTION: &str = "\
You are an expert hiring manager. Write a compelling and professional job \
description for the following job title: {{job_title}}.

The description should be comprehensive, including typical responsibilities, \
required skills, and qualifications. Do not include a \"What We Offer\" or \
salary section.

Return JSON of the form {\"job_description\": string}.";

pub const GENERATE_TAGS: &str = "\
You are a recruiting assistant. Read the job description below and propose \
between 3 and 8 short, lowercase tags that a candidate might search for \
(technologies, domains, seniority).

Job description:
{{job_description}}

Return JSON of the form {\"tags\": [string]}.";

pub const EXTRACT_SKILLS: &str = "\
You are a recruiting assistant. Extract the concrete professional skills \
(tools, languages, frameworks, methodologies) required by the job \
description below. Use each skill's common name and do not repeat a skill.

Job description:
{{job_description}}

Return JSON of the form {\"skills\": [string]}.";

pub const PARSE_RESUME: &str = "\
You are an expert resume parser. Analyze the attached resume file and extract \
the structured data from it.

If a LinkedIn profile is not present, omit the field. Preserve bullet points \
in descriptions as newlines. If there are no projects, return an empty array.

Return JSON with the keys full_name, email, phone, linkedin (optional), \
summary, experience [{title, company, start_date, end_date, description}], \
education [{degree, school, start_date, end_date}], projects [{title, \
description}] and skills (a comma-separated string).";

pub const ENHANCE_RESUME: &str = "\
You are an expert career coach and resume writer specializing in ATS-friendly \
resumes that land interviews.

Current resume:
- Summary: {{summary}}
- Experience:
{{experience}}
- Skills: {{skills}}

1. Rewrite the summary to be more impactful and concise.
2. Rewrite each experience description with strong action verbs and \
quantified achievements.
3. Suggest 3-5 additional relevant skills not already listed.
4. Give 2-3 sentences of constructive, high-level feedback.
5. Score the resume from 0 to 100 for quality.

Return JSON with the keys enhanced_summary, enhanced_experience [{title, \
company, enhanced_description}], suggested_skills [string], feedback and \
score (integer).";

pub const FIND_RELEVANT_BLOGS: &str = "\
You are an expert at recommending content. Given a job title, its skills and \
a list of blog posts, identify the most relevant blog posts (up to 3) for \
someone interested in this job. Consider the technologies mentioned, the role \
seniority and general career advice.

Job title: {{job_title}}
Job skills: {{job_skills}}

Available blog posts:
{{blogs}}

Return JSON of the form {\"blogs\": [id]}.";

/// Substitute every `{{name}}` in `template` with its value.
///
/// Unknown placeholders are left as-is. Values are inserted verbatim and are
/// not themselves scanned for placeholders.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
  let mut out = String::with_capacity(template.len());
  let mut rest = template;

  while let Some(start) = rest.find("{{") {
    out.push_str(&rest[..start]);
    let after = &rest[start + 2..];
    let Some(end) = after.find("}}") else {
      out.push_str(&rest[start..]);
      return out;
    };

    let name = &after[..end];
    match vars.iter().find(|(key, _)| *key == name) {
      Some((_, value)) => out.push_str(value),
      None => out.push_str(&rest[start..start + end + 4]),
    }
    rest = &after[end + 2..];
  }

  out.push_str(rest);
  out
}

/// Render a prompt and append the JSON-only instruction.
pub fn build(template: &str, vars: &[(&str, &str)]) -> String {
  format!("{}\n\n{JSON_ONLY}", render(template, vars))
}
