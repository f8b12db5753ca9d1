use crate::domain::{Indicator, MacroSnapshot};

/// Prompt asking for a short, actionable read of the snapshot.
pub fn build_prompt(snapshot: &MacroSnapshot) -> String {
    let stance = if snapshot.fed_stance.unwrap_or(0.0) > 0.0 {
        "restrictive"
    } else {
        "accommodative"
    };
    let curve = if snapshot.yield_spread.unwrap_or(0.0) < 0.0 {
        "inverted"
    } else {
        "normal"
    };

    let mut out = String::new();
    out.push_str(
        "You are a quantitative macro analyst. Analyze these economic indicators and provide \
         a concise trading summary (3-4 sentences max).\n\n",
    );
    out.push_str("CURRENT MACRO DATA:\n");
    for indicator in Indicator::ALL {
        let value = fmt_value(snapshot.get(indicator), indicator.is_percent());
        let suffix = match indicator {
            Indicator::GdpGrowth | Indicator::Inflation => " YoY".to_string(),
            Indicator::YieldSpread => format!(" ({curve})"),
            Indicator::FedStance => format!(" ({stance})"),
            _ => String::new(),
        };
        out.push_str(&format!("- {}: {value}{suffix}\n", indicator.display_name()));
    }

    out.push_str(
        "\nProvide:\n\
         1. Overall economic regime (expansion/slowdown/recession)\n\
         2. Asset class positioning (equities/bonds/commodities - bullish/neutral/bearish)\n\
         3. Key risks to watch\n\
         4. Specific actionable insight\n\n\
         Be direct and actionable. No disclaimers about not being financial advice.",
    );
    out
}

fn fmt_value(v: Option<f64>, percent: bool) -> String {
    match v {
        Some(x) if percent => format!("{x:.2}%"),
        Some(x) => format!("{x:.2}"),
        None => "N/A".to_string(),
    }
}
