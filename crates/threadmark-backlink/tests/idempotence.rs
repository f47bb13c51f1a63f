use std::fs;
use std::path::Path;

use threadmark_backlink::{BacklinkOptions, insert_backlinks};
use threadmark_core::ThreadDef;

fn threads() -> Vec<ThreadDef> {
    vec![
        ThreadDef {
            name: "AI_ML".to_string(),
            keywords: Vec::new(),
            documents: vec!["AI_Program_Overview".to_string()],
        },
        ThreadDef {
            name: "Activation_Data".to_string(),
            keywords: Vec::new(),
            documents: vec![
                "PETALE_Benchmark".to_string(),
                "AI_Program_Overview".to_string(),
            ],
        },
    ]
}

fn write_doc(dir: &Path, name: &str) {
    let stem = name.trim_end_matches(".md");
    let content = format!(
        "# {stem}\n\n**Source:** `{stem}.pdf`\n\n**Pages:** 2\n\n---\n\n# Page 1\n\nbody\n"
    );
    fs::write(dir.join(name), content).unwrap();
}

#[test]
fn second_run_is_a_no_op() {
    let tmp = tempfile::tempdir().unwrap();
    write_doc(tmp.path(), "2026-WANDA-AI_Program_Overview.md");
    write_doc(tmp.path(), "2026-WANDA-PETALE_Benchmark.md");
    write_doc(tmp.path(), "2026-WANDA-Unmapped_Deck.md");

    let options = BacklinkOptions::default();
    let first = insert_backlinks(tmp.path(), &threads(), &options).unwrap();
    assert_eq!(first.updated.len(), 2);
    assert_eq!(first.already_annotated, 0);
    assert_eq!(first.unmapped, 1);

    let snapshot: Vec<String> = ["AI_Program_Overview", "PETALE_Benchmark", "Unmapped_Deck"]
        .iter()
        .map(|stem| {
            fs::read_to_string(tmp.path().join(format!("2026-WANDA-{stem}.md"))).unwrap()
        })
        .collect();

    let second = insert_backlinks(tmp.path(), &threads(), &options).unwrap();
    assert!(second.updated.is_empty());
    assert_eq!(second.already_annotated, 2);
    assert_eq!(second.unmapped, 1);

    for (stem, before) in ["AI_Program_Overview", "PETALE_Benchmark", "Unmapped_Deck"]
        .iter()
        .zip(&snapshot)
    {
        let after =
            fs::read_to_string(tmp.path().join(format!("2026-WANDA-{stem}.md"))).unwrap();
        assert_eq!(&after, before, "{stem} changed on second run");
    }
}

#[test]
fn inserted_block_lands_after_header_separator() {
    let tmp = tempfile::tempdir().unwrap();
    write_doc(tmp.path(), "2026-WANDA-PETALE_Benchmark.md");

    insert_backlinks(tmp.path(), &threads(), &BacklinkOptions::default()).unwrap();

    let content =
        fs::read_to_string(tmp.path().join("2026-WANDA-PETALE_Benchmark.md")).unwrap();
    assert!(content.contains(
        "---\n\n**Related Threads:**\n- [[Threads/Activation_Data]]\n\n\n# Page 1\n"
    ));
}

#[test]
fn multi_thread_documents_list_threads_in_definition_order() {
    let tmp = tempfile::tempdir().unwrap();
    write_doc(tmp.path(), "2026-WANDA-AI_Program_Overview.md");

    let report = insert_backlinks(tmp.path(), &threads(), &BacklinkOptions::default()).unwrap();
    assert_eq!(report.updated[0].threads, ["AI_ML", "Activation_Data"]);

    let content =
        fs::read_to_string(tmp.path().join("2026-WANDA-AI_Program_Overview.md")).unwrap();
    assert!(content.contains(
        "**Related Threads:**\n- [[Threads/AI_ML]]\n- [[Threads/Activation_Data]]\n"
    ));
}

#[test]
fn files_without_the_prefix_are_left_alone() {
    let tmp = tempfile::tempdir().unwrap();
    write_doc(tmp.path(), "AI_Program_Overview.md");

    let report = insert_backlinks(tmp.path(), &threads(), &BacklinkOptions::default()).unwrap();
    assert!(report.updated.is_empty());
    assert_eq!(report.unmapped, 0);

    let content = fs::read_to_string(tmp.path().join("AI_Program_Overview.md")).unwrap();
    assert!(!content.contains("Related Threads:"));
}
