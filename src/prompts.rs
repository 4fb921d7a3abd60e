//! Prompt templates for site generation.
//!
//! Centralised so the conversion behaviour can be changed in one place and
//! inspected from tests without a live endpoint.

/// System message sent with every completion request.
pub const SYSTEM_PROMPT: &str = "You are an expert web designer.";

/// Fixed instruction block prepended to the extracted text.
const SITE_PROMPT_HEADER: &str = "\
Convert the following Nepali political document text into a single, complete, mobile-friendly HTML5 explainer website.
Requirements:
- Return ONLY the HTML (start with <!DOCTYPE html> or <html> and end with </html>).
- Do NOT include markdown fences like ```html.
- Do NOT include any explanation, notes, or extra text before/after the HTML.
- Include inline CSS in a <style> tag.
- Create a mobile-friendly, responsive design optimized for small screens.
- Structure the content with:
  * A clear summary section at the top
  * Key points highlighted in lists
  * Equality and representation sections clearly marked and emphasized
  * Clean headings, paragraphs, and organized sections
- Use professional styling with good readability for Nepali text.
- Ensure the layout works well on mobile devices.
";

/// Build the user prompt embedding the extracted document text.
pub fn site_prompt(extracted_text: &str) -> String {
    format!("{SITE_PROMPT_HEADER}\n{extracted_text}")
}
