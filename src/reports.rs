use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell as TableCell, CellAlignment, Color, ContentArrangement, Table};
use keynotes::layer::Layer;
use keynotes::layout::{Cell, Layout, LayoutRegistry};
use keynotes::model::{KeyData, NoteStatus};
use keynotes::session::SessionState;

fn status_color(status: NoteStatus) -> Option<Color> {
    match status {
        NoteStatus::Free => None,
        NoteStatus::Used => Some(Color::Green),
        NoteStatus::Fixed => Some(Color::Red),
        NoteStatus::Other => Some(Color::Yellow),
    }
}

/// The board grid for one layer: each key cap shows its label and, below
/// it, the first line of its note.
pub fn print_layer_grid(layout: &Layout, data: &KeyData, layer: Layer) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    for row in &layout.rows {
        let mut cells = Vec::new();
        for cell in row {
            match cell {
                Cell::Gap { .. } => cells.push(TableCell::new(" ")),
                Cell::Key { id, label, .. } => {
                    let note = data.note(id, layer).cloned().unwrap_or_default();
                    let content = if note.text.is_empty() {
                        label.clone()
                    } else {
                        format!("{}\n{}", label, note.first_line())
                    };
                    let mut table_cell =
                        TableCell::new(content).set_alignment(CellAlignment::Center);
                    if let Some(color) = status_color(note.status) {
                        table_cell = table_cell.fg(color).add_attribute(Attribute::Bold);
                    }
                    cells.push(table_cell);
                }
            }
        }
        table.add_row(cells);
    }
    println!("{}", table);
}

/// The multi-layer overview: one row per annotated key, one column per
/// layer, so all eight layers can be scanned at once.
pub fn print_layer_overview(layout: &Layout, data: &KeyData) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let mut header = vec![TableCell::new("Key").add_attribute(Attribute::Bold)];
    header.extend(
        Layer::all().map(|layer| TableCell::new(layer.label()).add_attribute(Attribute::Bold)),
    );
    table.set_header(header);

    let mut annotated = 0usize;
    for key_id in layout.annotatable_ids() {
        let Some(entry) = data.get(key_id) else {
            continue;
        };
        if entry.notes.values().all(|n| n.text.is_empty()) {
            continue;
        }
        annotated += 1;

        let mut cells = vec![TableCell::new(&entry.label)];
        for layer in Layer::all() {
            let note = entry.note(layer);
            let mut table_cell = TableCell::new(note.first_line());
            if let Some(color) = status_color(note.status) {
                table_cell = table_cell.fg(color);
            }
            cells.push(table_cell);
        }
        table.add_row(cells);
    }

    if annotated == 0 {
        println!("No notes yet.");
    } else {
        println!("{}", table);
    }
}

pub fn print_profiles(state: &SessionState) {
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    table.set_header(vec!["", "Id", "Name", "Board", "Keys annotated"]);

    for (id, profile) in &state.profiles {
        let marker = if *id == state.current_profile_id {
            "*"
        } else {
            ""
        };
        let annotated = profile
            .key_data
            .entries
            .values()
            .filter(|e| e.notes.values().any(|n| !n.text.is_empty()))
            .count();
        table.add_row(vec![
            marker.to_string(),
            id.clone(),
            profile.name.clone(),
            profile.layout_name.clone(),
            annotated.to_string(),
        ]);
    }
    println!("{}", table);
}

pub fn print_boards(registry: &LayoutRegistry, current: &str) {
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    table.set_header(vec!["", "Board", "Keys"]);

    for name in registry.names() {
        let marker = if name == current { "*" } else { "" };
        let keys = registry
            .resolve(name)
            .map(|l| l.annotatable_ids().len())
            .unwrap_or(0);
        table.add_row(vec![marker.to_string(), name.to_string(), keys.to_string()]);
    }
    println!("{}", table);
}
