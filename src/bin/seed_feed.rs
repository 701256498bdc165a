//! Generate a synthetic spool for trying the app against a large feed:
//! `seed_feed <dir> [count]`

use std::fs;
use std::path::Path;

use serde_json::json;

const SENDERS: &[(&str, &str)] = &[
    ("Alice Nguyen", "alice@harborview-mgmt.com"),
    ("Bob Ferreira", "bob@tenant.example.com"),
    ("Maintenance Desk", "workorders@harborview-mgmt.com"),
    ("Leasing Office", "leasing@harborview-mgmt.com"),
    ("Deals Weekly", "noreply@dealsweekly.example.com"),
];

const SUBJECTS: &[&str] = &[
    "Lease renewal for unit 2A",
    "URGENT: water leak reported in 4B",
    "Work order #1042 completed",
    "Invoice #204 for October",
    "Spring sale: 20% off storage units",
    "Owner statement ready",
    "Overdue rent reminder",
    "Package delivered to front office",
];

fn main() {
    let mut args = std::env::args().skip(1);
    let dir = args.next().unwrap_or_else(|| {
        shellexpand::tilde("~/.local/share/feedtui/feed").to_string()
    });
    let count: usize = args
        .next()
        .and_then(|a| a.parse().ok())
        .unwrap_or(2000);

    let messages = Path::new(&dir).join("messages");
    if let Err(e) = fs::create_dir_all(&messages) {
        eprintln!("Error creating {}: {}", messages.display(), e);
        return;
    }

    let base_ts: i64 = 1_754_000_000;
    for i in 0..count {
        let (name, addr) = SENDERS[i % SENDERS.len()];
        let subject = SUBJECTS[i % SUBJECTS.len()];
        let labels: Vec<&str> = match i % 10 {
            0 => vec!["priority"],
            4 | 9 => vec!["promotions"],
            _ => vec![],
        };
        let record = json!({
            "id": format!("msg-{i:05}"),
            "timestamp": base_ts - (i as i64) * 3600,
            "subject": subject,
            "sender": { "name": name, "addr": addr },
            "preview": format!("{} (message {} of the synthetic feed)", subject, i),
            "keywords": [],
            "labels": labels,
        });
        let path = messages.join(format!("msg-{i:05}.json"));
        if let Err(e) = fs::write(&path, record.to_string()) {
            eprintln!("Error writing {}: {}", path.display(), e);
            return;
        }
    }

    println!("Wrote {} records to {}", count, messages.display());
}
