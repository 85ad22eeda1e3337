use echolalia::RespondTrace;

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    /// Wraps text in an escape code, or passes it through when color is off.
    pub struct Palette {
        pub enabled: bool,
    }

    impl Palette {
        pub fn paint(&self, s: impl AsRef<str>, code: &str) -> String {
            if self.enabled { format!("{code}{}{RESET}", s.as_ref()) } else { s.as_ref().to_string() }
        }
    }
}

pub fn print_trace(input: &str, trace: &RespondTrace, color: bool) {
    let palette = ansi::Palette { enabled: color };
    let heading = palette.paint(format!("⚙  Input: \"{}\"", input), ansi::CYAN);
    println!("\n{}", palette.paint(heading, ansi::BOLD));

    println!("\n{}", palette.paint("━━━ Match ━━━", ansi::GRAY));
    match (trace.rule, &trace.pattern) {
        (Some(rule), Some(pattern)) => {
            println!(
                "  {} {} {}",
                palette.paint(format!("rule #{}", rule), ansi::BLUE),
                palette.paint("│", ansi::DIM),
                palette.paint(pattern, ansi::YELLOW)
            );
            if let Some(template) = trace.template {
                let index = palette.paint(format!("#{}", template), ansi::BLUE);
                println!("  {} {}", palette.paint("template:", ansi::DIM), index);
            }
        }
        _ => {
            println!("{}", palette.paint("  No response rule matched", ansi::DIM));
            let tip = "  Tip: Set ECHOLALIA_DEBUG_RULES=1 to log rule matching details";
            println!("\n{}", palette.paint(tip, ansi::DIM));
        }
    }

    if !trace.groups.is_empty() {
        println!("\n{}", palette.paint("━━━ Groups ━━━", ansi::GRAY));
        print_groups(trace, &palette);
    }

    println!("\n{}", palette.paint("━━━ Reply ━━━", ansi::GRAY));
    println!("  {}", palette.paint(palette.paint(&trace.reply, ansi::GREEN), ansi::BOLD));
    let elapsed = palette.paint(format!("{:?}", trace.elapsed), ansi::GREEN);
    println!("  {} {}", palette.paint("elapsed:", ansi::DIM), elapsed);
    println!();
}

fn print_groups(trace: &RespondTrace, palette: &ansi::Palette) {
    for (idx, (raw, reflected)) in trace.groups.iter().zip(&trace.reflected).enumerate() {
        println!(
            "  {} {} {} {}",
            palette.paint(format!("${}", idx + 1), ansi::GRAY),
            palette.paint(format!("\"{}\"", raw), ansi::YELLOW),
            palette.paint("→", ansi::DIM),
            palette.paint(format!("\"{}\"", reflected), ansi::CYAN),
        );
    }
}
