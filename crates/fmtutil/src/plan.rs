use searchsql_client::ExplainPlan;

/// Render an explain plan.
///
/// The plan is printed exactly as the service sent it (pretty-printed,
/// field order preserved). No transformation happens here: re-parsing the
/// output yields the input tree.
pub fn format_plan(plan: &ExplainPlan) -> String {
    let mut out = serde_json::to_string_pretty(&plan.0)
        .expect("a json value always serializes back to json");
    out.push('\n');
    out
}
