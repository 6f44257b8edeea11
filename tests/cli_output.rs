use anyhow::Result;
use clap::Parser;
use pdf_quizgen::{
    cli::{dispatch, usage, Args, USAGE},
    engine::{Generation, TextGenerator},
    extract::PageSource,
    pipeline::Pipeline,
    questions::DEFAULT_NUM_QUESTIONS,
    report::write_questions,
};

struct Constant(&'static str, usize);

impl TextGenerator for Constant {
    fn generate(&mut self, _prompt: &str) -> Result<Vec<Generation>> {
        self.1 += 1;
        Ok(vec![Generation {
            generated_text: self.0.to_string(),
        }])
    }
}

struct Pages(Vec<&'static str>);

impl PageSource for Pages {
    fn page_count(&self) -> usize {
        self.0.len()
    }

    fn page_text(&self, index: usize) -> Result<String> {
        Ok(self.0[index].to_string())
    }
}

#[test]
fn missing_path_is_accepted_by_the_parser() {
    let args = Args::try_parse_from(["pdf-quizgen"]).unwrap();
    assert!(args.input.is_none());

    let args = Args::try_parse_from(["pdf-quizgen", "notes.pdf"]).unwrap();
    assert_eq!(args.input.as_deref(), Some(std::path::Path::new("notes.pdf")));
}

#[test]
fn extra_arguments_after_the_path_are_ignored() {
    let args = Args::try_parse_from(["pdf-quizgen", "notes.pdf", "b", "c"]).unwrap();
    assert_eq!(args.input.as_deref(), Some(std::path::Path::new("notes.pdf")));
    assert_eq!(args.extra, vec!["b", "c"]);
}

#[test]
fn dispatch_without_a_path_exits_1() {
    let args = Args::try_parse_from(["pdf-quizgen"]).unwrap();
    assert_eq!(dispatch(args).unwrap(), 1);
}

#[test]
fn usage_prints_literal_message_and_exits_1() {
    let mut out = Vec::new();
    let code = usage(&mut out).unwrap();
    assert_eq!(code, 1);
    assert_eq!(String::from_utf8(out).unwrap(), format!("{USAGE}\n"));
    assert_eq!(USAGE, "Usage: pdf-quizgen <pdf_path>");
}

#[test]
fn numbered_output_for_three_questions() {
    let mut model = Constant("Q?", 0);
    let questions =
        pdf_quizgen::questions::generate_questions(&mut model, "Hello\nWorld\n", 3).unwrap();

    let mut out = Vec::new();
    write_questions(&mut out, &questions).unwrap();
    let out = String::from_utf8(out).unwrap();
    assert_eq!(
        out.lines().collect::<Vec<_>>(),
        vec!["Generated Assignment Questions:", "1. Q?", "2. Q?", "3. Q?"]
    );
}

#[test]
fn pipeline_generates_default_count_from_pages() {
    let mut pipeline = Pipeline::new(Constant("What is said?", 0));
    let questions = pipeline.run(&Pages(vec!["Hello", "World"])).unwrap();
    assert_eq!(questions.len(), DEFAULT_NUM_QUESTIONS);
    assert_eq!(DEFAULT_NUM_QUESTIONS, 5);
    assert_eq!(pipeline.into_generator().1, 5);
}
