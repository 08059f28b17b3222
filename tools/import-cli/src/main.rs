use std::env;
use std::fs;
use std::path::Path;

use import_service::import_questions_from_path;
use question_model::SubjectId;
use question_store::sqlite_repo::SqliteStore;
use question_store::QuestionStore;

fn print_usage() {
    eprintln!(
        "Usage: import-cli <questions.docx> [--db PATH] [--subject ID] [--count]\n\
         Examples:\n\
           import-cli ./de-thi.docx --db ./questions.db --subject thuy-van\n\
           import-cli ./de-thi.docx --count                (uses target/demo/questions.db)\n"
    );
}

fn ensure_parent_dir(path: &str) -> std::io::Result<()> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = tracing_subscriber::fmt::try_init();

    let mut docx: Option<String> = None;
    let mut db_path = String::from("target/demo/questions.db");
    let mut subject: Option<SubjectId> = None;
    let mut show_count = false;

    let rest: Vec<String> = env::args().skip(1).collect();
    let mut i = 0;
    while i < rest.len() {
        match rest[i].as_str() {
            "--db" => {
                if i + 1 < rest.len() { db_path = rest[i + 1].clone(); i += 2; }
                else { print_usage(); return Ok(()); }
            }
            "--subject" => {
                if i + 1 < rest.len() { subject = Some(SubjectId::new(rest[i + 1].clone())); i += 2; }
                else { print_usage(); return Ok(()); }
            }
            "--count" => { show_count = true; i += 1; }
            "--help" | "-h" => { print_usage(); return Ok(()); }
            other => {
                if docx.is_none() && !other.starts_with('-') {
                    docx = Some(other.to_string());
                    i += 1;
                } else {
                    eprintln!("Unknown arg: {}", other);
                    print_usage();
                    return Ok(());
                }
            }
        }
    }

    let docx = match docx {
        Some(p) => p,
        None => {
            eprintln!("A .docx file must be provided");
            print_usage();
            return Ok(());
        }
    };

    ensure_parent_dir(&db_path)?;
    let mut store = SqliteStore::open(&db_path)?;

    let inserted = import_questions_from_path(&docx, subject.as_ref(), &mut store)?;
    println!("Imported {} new question(s) from {}", inserted, docx);

    if show_count {
        let total = store.count_by_subject(subject.as_ref())?;
        match &subject {
            Some(s) => println!("Store now holds {} question(s) for subject {}", total, s.0),
            None => println!("Store now holds {} question(s)", total),
        }
    }

    Ok(())
}
