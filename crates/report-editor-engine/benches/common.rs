// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_section_content(size: usize) -> String {
    let base = "## Overview\n\nA paragraph with **bold** and ==highlighted== words.\n\n- First point\n- Second **point**\n1. Step one\n2. Step two\n> Quoted remark\n\n";
    base.repeat(size)
}

#[allow(dead_code)]
pub fn generate_report_json(sections: usize) -> String {
    let sections: Vec<String> = (0..sections)
        .map(|i| {
            format!(
                r#"{{"type": "section_{i}", "content": "### Part {i}\n- **key** idea {i}\n- ==note== {i}\nClosing line"}}"#
            )
        })
        .collect();
    format!(
        r#"{{"final_output": {{"youtube_url": "https://youtu.be/bench", "sections": [{}]}}}}"#,
        sections.join(",")
    )
}
