//! Diagnostics table.

use std::io::{self, Write as _};

use githubtok::diagnostics::Diagnostics;
use tabled::{
    builder::Builder,
    settings::{Color, Style, Theme, object::Rows},
};

pub(crate) fn print(diagnostics: &Diagnostics) {
    if let Some(table) = render(diagnostics) {
        // Nothing else useful to do if stderr is gone
        _ = writeln!(io::stderr().lock(), "{table}");
    }
}

pub(crate) fn render(diagnostics: &Diagnostics) -> Option<String> {
    if diagnostics.is_empty() {
        return None;
    }

    let mut builder = Builder::default();

    builder.push_record(["Severity", "Attribute", "Summary", "Detail"]);

    for diagnostic in diagnostics {
        builder.push_record([
            diagnostic.severity.to_string(),
            diagnostic
                .attribute
                .map(|attribute| attribute.as_str().to_string())
                .unwrap_or_default(),
            diagnostic.summary.clone(),
            diagnostic.detail.clone().unwrap_or_default(),
        ]);
    }

    let mut table = builder.build();

    table.with(Theme::from(Style::modern_rounded()));
    table.modify(Rows::first(), Color::BOLD);

    Some(table.to_string())
}
