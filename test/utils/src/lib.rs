/// A typical assistant reply mixing every construct the renderer supports.
pub fn reply_fixture() -> &'static str {
    return r#"
Here's a quick look at **10-A** this term.

**At-risk students:**
- **Maya Patel**: attendance dropped to *71%*
- Leo Chen: two missed assignments
• Priya Singh: maths score below *cluster* average

Suggested next steps:
1. Schedule a check-in with **Maya** this week.
2. Pair Leo with a study buddy.

Overall the class is *trending up*, with an average of 74.2.
"#
    .trim();
}
