use import_service::import_questions_from_path;
use question_model::SubjectId;
use question_store::sqlite_repo::SqliteStore;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: cargo run -p import-service --example import_docx -- <FILE.docx> [SUBJECT]");
        std::process::exit(1);
    }
    let file = &args[1];
    let subject = args.get(2).map(|s| SubjectId::new(s.clone()));

    let mut store = SqliteStore::new();
    let inserted = import_questions_from_path(file, subject.as_ref(), &mut store)?;
    println!("Imported {} question(s) from {}", inserted, file);

    for record in store.sample_random(5, subject.as_ref())? {
        let preview: String = record.stem.chars().take(80).collect();
        println!(
            "- [{}] {} ({} option(s), answer {})",
            record.id.0,
            preview,
            record.options.len(),
            record.correct_answer
        );
    }
    Ok(())
}
