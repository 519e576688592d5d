pub mod bbox;
pub mod cli;
pub mod gcode;

use layerkit::ConversionReport;

fn print_report(report: &ConversionReport) {
    println!(
        "Wrote {} points, {} edges from {} to {}",
        report.points,
        report.edges,
        report.input.display(),
        report.output.display()
    );
    if report.warnings > 0 {
        println!("{} warning(s), see log for details", report.warnings);
    }
}
