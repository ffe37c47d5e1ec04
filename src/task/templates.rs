//! Builtin task description templates and expected outputs.
//!
//! Descriptions use the template syntax from [`crate::agent::render_template`].
//! Optional parameters carry their defaults inline as `{name|default}`
//! fallbacks, so an unparameterized run still renders a complete prompt.

use crate::task::TaskKind;

/// Builtin description template for a task kind.
pub(crate) fn description(kind: TaskKind) -> &'static str {
    match kind {
        TaskKind::Introduce => {
            "Introduce yourself as the user you represent. Cover:\n\
             1. Professional background\n\
             2. Key achievements\n\
             3. Current focus\n\
             4. Unique value proposition\n\
             5. What makes you stand out\n\n\
             Write in the first person, engaging and authentic."
        }
        TaskKind::Pitch => {
            "Create a compelling venture capital pitch for: {idea_or_company|my business idea}\n\n\
             Structure the pitch around:\n\
             1. Problem and market opportunity\n\
             2. Solution and unique value proposition\n\
             3. Business model and revenue streams\n\
             4. Market size and traction\n\
             5. Competitive advantage and moats\n\
             6. Team and execution capability\n\
             7. Financial projections and funding ask\n\
             8. Use of funds and milestones"
        }
        TaskKind::ColdEmail => {
            "Draft a professional cold email to {investor_name|a potential investor} \
             requesting a short meeting.\n\
             Context: {context|seeking business advice}\n\n\
             The email needs:\n\
             1. An attention-grabbing subject line\n\
             2. A personalized hook\n\
             3. A brief introduction of who you are\n\
             4. Why you are reaching out to them specifically\n\
             5. The advice or input you are looking for\n\
             6. A suggested meeting format and length\n\
             7. A clear call to action\n\
             8. A total length under 200 words"
        }
        TaskKind::SearchAcquisitions => {
            "Search for the latest acquisitions and market activity in: \
             {areas_of_interest|technology and startups}\n\
             The current date is {current_date}.\n\n\
             Report on:\n\
             1. Recent acquisitions and deal values\n\
             2. Key players and active acquirers\n\
             3. Market trends\n\
             4. Investment themes and valuations\n\
             5. Opportunities and gaps\n\
             6. Strategic insights for founders"
        }
    }
}

/// One-line statement of what a good result looks like.
pub(crate) fn expected_output(kind: TaskKind) -> &'static str {
    match kind {
        TaskKind::Introduce => {
            "A compelling personal introduction that represents the user professionally"
        }
        TaskKind::Pitch => "Comprehensive VC pitch content ready to present to investors",
        TaskKind::ColdEmail => "A professional cold email draft ready to send",
        TaskKind::SearchAcquisitions => {
            "A report on the latest acquisitions and market activity in the requested areas"
        }
    }
}
