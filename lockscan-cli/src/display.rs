use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL};

use lockscan_core::analysis::scorer::ScoreRecord;
use lockscan_core::analysis::selector::Selection;
use lockscan_core::report::DIGIT_SEPARATOR;
use lockscan_db::models::{DailyCursor, LockSize};

fn role(record: &ScoreRecord, selection: Option<&Selection>) -> (&'static str, Color) {
    let Some(s) = selection else {
        return ("", Color::White);
    };
    if record.candidate == s.primary_all3.candidate {
        ("PRIMARY ALL3", Color::Green)
    } else if record.candidate == s.primary_both.candidate {
        ("PRIMARY BOTH", Color::Green)
    } else if s.supplement.is_some_and(|r| r.candidate == record.candidate) {
        ("SUPPLEMENT", Color::Cyan)
    } else if s.others.iter().any(|r| r.candidate == record.candidate) {
        ("OPTION", Color::Yellow)
    } else {
        ("", Color::White)
    }
}

pub fn display_scores(
    ranked: &[ScoreRecord],
    selection: Option<&Selection>,
    total_locks: u32,
    top: usize,
) {
    println!(
        "\n🎯 Full-coverage sets ({} shown of {}, {} locks)\n",
        ranked.len().min(top),
        ranked.len(),
        total_locks
    );

    if ranked.is_empty() {
        println!("No 3-digit set covers every lock ({}/{})", total_locks, total_locks);
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "Set", "ANY", "BOTH", "ALL3", "Role"]);

    for (i, record) in ranked.iter().take(top).enumerate() {
        let (label, color) = role(record, selection);
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(record.candidate.joined(DIGIT_SEPARATOR)),
            Cell::new(format!("{}/{}", record.any, total_locks)),
            Cell::new(format!("{}/{}", record.both, total_locks)),
            Cell::new(format!("{}/{}", record.all3, total_locks)),
            Cell::new(label).fg(color),
        ]);
    }
    println!("{table}");
}

pub fn display_status(cursor: &DailyCursor, lock_size: LockSize) {
    println!("📅 Today's status ({})", cursor.day);
    println!("  Lock size             : {}", lock_size);
    println!("  Last recorded round   : {}", cursor.last_processed_round_count);
    println!("  Complete locks        : {}", cursor.complete_locks(lock_size));
}

pub fn display_cursors(cursors: &[DailyCursor], lock_size: LockSize) {
    if cursors.is_empty() {
        println!("No day processed yet.");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Day", "Rounds processed", "Complete locks"]);

    for cursor in cursors {
        table.add_row(vec![
            cursor.day.to_string(),
            cursor.last_processed_round_count.to_string(),
            cursor.complete_locks(lock_size).to_string(),
        ]);
    }
    println!("{table}");
}
