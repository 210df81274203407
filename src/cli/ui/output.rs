use console::style;

pub struct Output;

impl Output {
    pub fn new() -> Self {
        Self
    }

    pub fn success(&self, message: &str) {
        println!("{} {}", style("✓").green(), message);
    }

    pub fn warning(&self, message: &str) {
        println!("{} {}", style("⚠").yellow(), message);
    }

    pub fn info(&self, message: &str) {
        println!("{} {}", style("ℹ").blue(), message);
    }

    pub fn header(&self, message: &str) {
        println!("\n{}", style(message).bold().underlined());
    }

    pub fn section(&self, message: &str) {
        println!("\n{}", style(message).bold());
        println!("{}", "─".repeat(40));
    }

    /// Aligned "label: value" line, label dimmed
    pub fn field(&self, label: &str, value: &str) {
        println!("  {:<16} {}", style(format!("{}:", label)).dim(), value);
    }

    /// Section heading followed by its body; empty bodies show a placeholder
    pub fn block(&self, title: &str, body: &str) {
        self.section(title);
        if body.trim().is_empty() {
            println!("{}", style("(empty)").dim());
        } else {
            println!("{}", body);
        }
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}
