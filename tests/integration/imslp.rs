//! Integration tests for the IMSLP pipeline with a recording runner.

use std::sync::Mutex;

use scanutils::Result;
use scanutils::config::{BitmapOptions, Threshold};
use scanutils::exec::{CommandRunner, ToolCommand};
use scanutils::output::OutputFormatter;
use scanutils::tools::imslp::{Imslp, RunContext};

use crate::common::{dir_with_files, path_str};

#[derive(Default)]
struct Recorder {
    lines: Mutex<Vec<String>>,
}

impl Recorder {
    fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }
}

impl CommandRunner for Recorder {
    async fn run(&self, command: &ToolCommand) -> Result<()> {
        self.lines.lock().unwrap().push(command.to_string());
        Ok(())
    }

    async fn output(&self, command: &ToolCommand) -> Result<String> {
        self.lines.lock().unwrap().push(command.to_string());
        Ok(String::new())
    }
}

#[tokio::test]
async fn test_bitmap_join_of_images() {
    let root = dir_with_files(&["p1.tif", "p2.tif", "p3.tif"], "image data");
    let files: Vec<String> = ["p1.tif", "p2.tif", "p3.tif"]
        .iter()
        .map(|name| path_str(root.path(), name))
        .collect();
    let ctx = RunContext::with_token(&files, "abc").unwrap();

    let recorder = Recorder::default();
    let formatter = OutputFormatter::quiet();
    let imslp = Imslp::new(&recorder, &formatter, ToolCommand::new("convert"), ctx);
    let options = BitmapOptions {
        join: true,
        pdf: true,
        threshold: Threshold::new(65).unwrap(),
        ..Default::default()
    };

    let targets = imslp.bitmap(&options).await.unwrap();

    let names: Vec<&str> = targets.iter().map(|t| t.filename()).collect();
    assert_eq!(names, ["p1.pdf", "p2.pdf", "p3.pdf"]);

    let lines = recorder.lines();
    assert_eq!(lines.len(), 4);
    assert!(lines[..3].iter().all(|line| line.contains("-threshold 65%")));
    assert_eq!(
        lines[3],
        format!(
            "pdftk {} {} {} cat output {}",
            path_str(root.path(), "p1.pdf"),
            path_str(root.path(), "p2.pdf"),
            path_str(root.path(), "p3.pdf"),
            path_str(root.path(), "p1_magick.pdf"),
        )
    );
}

#[tokio::test]
async fn test_bitmap_of_pdf_extracts_images_in_common_path() {
    let root = dir_with_files(&["score.pdf"], "%PDF");
    let ctx = RunContext::with_token(&[path_str(root.path(), "score.pdf")], "abc").unwrap();

    let recorder = Recorder::default();
    let formatter = OutputFormatter::quiet();
    let imslp = Imslp::new(&recorder, &formatter, ToolCommand::new("convert"), ctx);

    let targets = imslp.bitmap(&BitmapOptions::default()).await.unwrap();

    // The recorder extracts nothing, so nothing is converted.
    assert!(targets.is_empty());
    assert_eq!(
        recorder.lines(),
        [format!(
            "pdfimages -tiff {} score_magick_abc",
            path_str(root.path(), "score.pdf")
        )]
    );
}
