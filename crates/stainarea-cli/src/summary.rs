use console::Style;
use stainarea_core::history::HistorySummary;
use stainarea_core::result::{CalculationResult, CoverageBand};

struct Styles {
    title: Style,
    label: Style,
    value: Style,
    highlight: Style,
    dim: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            highlight: Style::new().green().bold(),
            dim: Style::new().dim().yellow(),
        }
    }
}

fn band_style(band: CoverageBand) -> Style {
    match band {
        CoverageBand::Low => Style::new().red(),
        CoverageBand::Moderate => Style::new().yellow(),
        CoverageBand::Substantial => Style::new().blue(),
        CoverageBand::High => Style::new().green(),
    }
}

fn rule(width: usize) -> String {
    "\u{2550}".repeat(width)
}

pub fn print_result(r: &CalculationResult) {
    let s = Styles::new();
    let band = r.coverage_band();

    println!();
    println!("  {}", s.title.apply_to("Stain Area Estimate"));
    println!("  {}", s.title.apply_to(rule(19)));
    println!();
    println!("  {:<16}{}", s.label.apply_to("Image"), s.value.apply_to(&r.image_name));
    println!(
        "  {:<16}{}",
        s.label.apply_to("Dimensions"),
        s.value.apply_to(format!("{}x{}", r.image_width, r.image_height))
    );
    println!(
        "  {:<16}{}",
        s.label.apply_to("Image area"),
        s.value.apply_to(format!("{} px", r.total_image_area))
    );
    println!(
        "  {:<16}{}",
        s.label.apply_to("Points"),
        s.value.apply_to(format!(
            "{} inside of {}",
            r.points_inside_stain, r.total_random_points
        ))
    );
    println!(
        "  {:<16}{} {}",
        s.label.apply_to("Coverage"),
        s.value.apply_to(format!("{:.2}%", r.coverage_percent())),
        band_style(band).apply_to(format!("({band})"))
    );
    println!(
        "  {:<16}{}",
        s.label.apply_to("Stain area"),
        s.highlight.apply_to(format!("{:.2} px", r.estimated_stain_area))
    );
    println!(
        "  {:<16}{}",
        s.label.apply_to("Id"),
        s.dim.apply_to(r.id)
    );
    println!(
        "  {:<16}{}",
        s.label.apply_to("Date"),
        s.dim.apply_to(r.calculation_date.format("%Y-%m-%d %H:%M:%S UTC"))
    );
    println!();
}

pub fn print_history_table(results: &[CalculationResult]) {
    let s = Styles::new();
    if results.is_empty() {
        println!("{}", s.dim.apply_to("No results recorded."));
        return;
    }

    println!(
        "{:<36}  {:<20}  {:>11}  {:>7}  {:>9}  {:>12}",
        "Id", "Image", "Size", "Points", "Coverage", "Area (px)"
    );
    println!("{}", "-".repeat(104));
    for r in results {
        let band = r.coverage_band();
        println!(
            "{:<36}  {:<20}  {:>11}  {:>7}  {}  {:>12.2}",
            r.id,
            truncate(&r.image_name, 20),
            format!("{}x{}", r.image_width, r.image_height),
            r.total_random_points,
            band_style(band).apply_to(format!("{:>8.2}%", r.coverage_percent())),
            r.estimated_stain_area
        );
    }
}

pub fn print_history_summary(summary: &HistorySummary) {
    let s = Styles::new();
    println!();
    println!("  {}", s.title.apply_to("History Summary"));
    println!("  {}", s.title.apply_to(rule(15)));
    println!();
    println!("  {:<18}{}", s.label.apply_to("Results"), s.value.apply_to(summary.count));
    println!(
        "  {:<18}{}",
        s.label.apply_to("Average area"),
        s.value.apply_to(format!("{:.2} px", summary.average_area))
    );
    println!(
        "  {:<18}{}",
        s.label.apply_to("Average coverage"),
        s.value.apply_to(format!("{:.2}%", summary.average_coverage_percent))
    );
    println!(
        "  {:<18}{}",
        s.label.apply_to("Average points"),
        s.value.apply_to(format!("{:.0}", summary.average_points))
    );
    println!();
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let head: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{head}\u{2026}")
    }
}
