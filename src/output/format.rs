//! Text rendering of catalog and table state for the `show` command

use colored::Colorize;
use std::fmt::Write;

use crate::catalog::CatalogSnapshot;
use crate::records::PageView;

/// Render the catalog as an indented tree, marking the selection with `*`
#[must_use]
pub fn catalog_tree(snapshot: &CatalogSnapshot) -> String {
    let mut out = String::new();
    for (type_name, devices) in &snapshot.types {
        let type_selected = snapshot.selected_type.as_deref() == Some(type_name.as_str());
        let _ = writeln!(out, "{}{}", marker(type_selected), type_name.bold());
        for (device, stations) in devices {
            let device_selected =
                type_selected && snapshot.selected_device.as_deref() == Some(device.as_str());
            let _ = writeln!(out, "  {}{}", marker(device_selected), device);
            for station in stations {
                let _ = writeln!(out, "      {}", station.dimmed());
            }
        }
    }
    if out.is_empty() {
        out.push_str("(empty catalog)\n");
    }
    out
}

/// Render one table page with its pager line
#[must_use]
pub fn page_table(title: &str, page: &PageView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", title.bold().underline());
    for row in &page.rows {
        let _ = writeln!(out, "  {:>4}  {}  {}", row.id, row.name, row.chips.to_string().cyan());
    }
    for _ in 0..page.filler_rows {
        out.push_str("        \n");
    }
    let _ = writeln!(out, "  {}", pager(page).dimmed());
    out
}

/// Pager text such as `< 1 / 2 >`, arrows shown only when available
#[must_use]
pub fn pager(page: &PageView) -> String {
    format!(
        "{} {} / {} {}",
        if page.has_prev { "<" } else { " " },
        page.page,
        page.total_pages,
        if page.has_next { ">" } else { " " },
    )
}

fn marker(selected: bool) -> String {
    if selected {
        format!("{} ", "*".green())
    } else {
        "  ".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::DeviceMap;

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_catalog_tree_marks_selection() {
        plain();
        let mut snapshot = CatalogSnapshot::with_types(["吸塑机", "焊接机"]);
        let mut devices = DeviceMap::new();
        devices.insert("33号焊接机".to_string(), vec!["伺服电机".to_string()]);
        snapshot.types.insert("焊接机".to_string(), devices);
        snapshot.selected_type = Some("焊接机".to_string());
        snapshot.selected_device = Some("33号焊接机".to_string());

        let tree = catalog_tree(&snapshot);
        let lines: Vec<_> = tree.lines().collect();
        assert_eq!(lines[0], "  吸塑机");
        assert_eq!(lines[1], "* 焊接机");
        assert_eq!(lines[2], "  * 33号焊接机");
        assert_eq!(lines[3], "      伺服电机");
    }

    #[test]
    fn test_empty_tree() {
        plain();
        assert_eq!(catalog_tree(&CatalogSnapshot::default()), "(empty catalog)\n");
    }

    #[test]
    fn test_pager() {
        let page = PageView {
            rows: Vec::new(),
            filler_rows: 5,
            page: 1,
            total_pages: 2,
            has_prev: false,
            has_next: true,
            sort: None,
        };
        assert_eq!(pager(&page), "  1 / 2 >");
    }
}
