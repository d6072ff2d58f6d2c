//! Text rendering of calculation results.
//!
//! Probabilities print with 6 decimals, traffic with 2. Capped and unbounded
//! answers always say so in words.

use erlang_core::calculations::{
    BlockingInput, BlockingResult, CalculationItem, CalculationOutput, ChannelsInput, ChannelsResult,
    Solution, TrafficInput, TrafficResult, TrafficSolution,
};

const RULE: &str = "═══════════════════════════════════════";

pub fn format_probability(p: f64) -> String {
    format!("{:.6}", p)
}

pub fn format_traffic(solution: &TrafficSolution) -> String {
    match solution {
        TrafficSolution::Exact(a) => format!("{:.2} Erlangs", a),
        TrafficSolution::Capped(a) => format!("{:.2} Erlangs (capped at search limit)", a),
        TrafficSolution::Unbounded => "unbounded (any finite load meets the target)".to_string(),
    }
}

pub fn format_channels(solution: &Solution<u32>) -> String {
    match solution {
        Solution::Exact(n) => n.to_string(),
        Solution::Capped(n) => format!("{} (capped at search limit)", n),
    }
}

pub fn blocking(input: &BlockingInput, result: &BlockingResult) -> String {
    [
        format!("Channels (N):          {}", input.channels),
        format!("Offered traffic (A):   {:.2} Erlangs", input.traffic_erlangs),
        format!("Blocking probability:  {}", format_probability(result.blocking_probability)),
        format!("Carried traffic:       {:.2} Erlangs", result.carried_traffic_erlangs),
        format!("Lost traffic:          {:.2} Erlangs", result.lost_traffic_erlangs),
    ]
    .join("\n")
}

pub fn channels(input: &ChannelsInput, result: &ChannelsResult) -> String {
    let mut lines = vec![
        format!("Offered traffic (A):   {:.2} Erlangs", input.traffic_erlangs),
        format!("Target blocking:       {}", format_probability(input.target_blocking)),
        format!("Channels required:     {}", format_channels(&result.channels)),
        format!("Achieved blocking:     {}", format_probability(result.achieved_blocking)),
    ];
    if result.channels.is_capped() {
        lines.push("Warning: no channel count within the search limit meets the target".to_string());
    }
    lines.join("\n")
}

pub fn traffic(input: &TrafficInput, result: &TrafficResult) -> String {
    let mut lines = vec![
        format!("Channels (N):          {}", input.channels),
        format!("Target blocking:       {}", format_probability(input.target_blocking)),
        format!("Offered traffic:       {}", format_traffic(&result.traffic)),
    ];
    if let Some(achieved) = result.achieved_blocking {
        lines.push(format!("Achieved blocking:     {}", format_probability(achieved)));
    }
    if result.traffic.is_capped() {
        lines.push("Warning: the target is not reached below the traffic limit".to_string());
    }
    lines.join("\n")
}

/// Render any item/output pair, with a titled banner.
pub fn item(item: &CalculationItem, output: &CalculationOutput) -> String {
    let body = match (item, output) {
        (CalculationItem::Blocking(i), CalculationOutput::Blocking(r)) => blocking(i, r),
        (CalculationItem::Channels(i), CalculationOutput::Channels(r)) => channels(i, r),
        (CalculationItem::Traffic(i), CalculationOutput::Traffic(r)) => traffic(i, r),
        _ => format!("{:?}", output),
    };

    let title = if item.label().is_empty() {
        item.calc_type().to_uppercase()
    } else {
        format!("{} - {}", item.calc_type().to_uppercase(), item.label())
    };

    format!("{}\n  {}\n{}\n{}", RULE, title, RULE, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probability_precision() {
        assert_eq!(format_probability(0.0071424381), "0.007142");
        assert_eq!(format_probability(1.0), "1.000000");
    }

    #[test]
    fn test_traffic_variants_render_distinctly() {
        assert_eq!(format_traffic(&TrafficSolution::Exact(8.108043)), "8.11 Erlangs");
        assert!(format_traffic(&TrafficSolution::Capped(1e6)).contains("capped"));
        assert!(format_traffic(&TrafficSolution::Unbounded).starts_with("unbounded"));
    }

    #[test]
    fn test_channels_capped_warning() {
        let input = ChannelsInput {
            label: String::new(),
            traffic_erlangs: 1000.0,
            target_blocking: 0.001,
        };
        let result = ChannelsResult {
            channels: Solution::Capped(50),
            achieved_blocking: 0.95,
        };
        let text = channels(&input, &result);
        assert!(text.contains("Channels required:     50 (capped at search limit)"));
        assert!(text.contains("Warning"));
    }

    #[test]
    fn test_item_banner_uses_label() {
        let input = BlockingInput {
            label: "PBX".to_string(),
            channels: 1,
            traffic_erlangs: 1.0,
        };
        let result = BlockingResult {
            blocking_probability: 0.5,
            carried_traffic_erlangs: 0.5,
            lost_traffic_erlangs: 0.5,
        };
        let text = item(&CalculationItem::Blocking(input), &CalculationOutput::Blocking(result));
        assert!(text.contains("BLOCKING - PBX"));
        assert!(text.contains("Blocking probability:  0.500000"));
    }
}
