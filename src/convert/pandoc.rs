//! External converter strategy backed by pandoc.

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::Result;

use super::{Attempt, RenderJob, RenderStrategy};

const INPUT_FORMAT: &str = "markdown+smart";
const STDERR_LIMIT: usize = 400;

/// Locate an executable by name on `PATH`, or check an explicit path.
pub fn find_program(program: &str) -> Option<PathBuf> {
    let path = Path::new(program);
    if path.components().count() > 1 {
        return path.is_file().then(|| path.to_path_buf());
    }

    let search = env::var_os("PATH")?;
    env::split_paths(&search).find_map(|dir| {
        let candidate = dir.join(program);
        if candidate.is_file() {
            return Some(candidate);
        }
        if cfg!(windows) {
            let exe = candidate.with_extension("exe");
            if exe.is_file() {
                return Some(exe);
            }
        }
        None
    })
}

/// Runs `pandoc <input> -o <output> --from markdown+smart --toc`.
#[derive(Debug, Clone)]
pub struct PandocStrategy {
    name: String,
    program: String,
    pdf_engine: Option<String>,
}

impl PandocStrategy {
    /// Create a strategy using `pandoc` from `PATH`.
    pub fn new() -> Self {
        Self {
            name: "pandoc".to_string(),
            program: "pandoc".to_string(),
            pdf_engine: None,
        }
    }

    /// Use a different pandoc executable.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Pass `--pdf-engine=<engine>`; the attempt is skipped unless the engine
    /// is on `PATH`.
    pub fn with_pdf_engine(mut self, engine: impl Into<String>) -> Self {
        let engine = engine.into();
        self.name = format!("pandoc ({})", engine);
        self.pdf_engine = Some(engine);
        self
    }

    /// Command-line arguments for a job.
    pub fn args(&self, job: &RenderJob) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            job.input.clone().into(),
            "-o".into(),
            job.output.clone().into(),
            "--from".into(),
            INPUT_FORMAT.into(),
            "--toc".into(),
        ];
        if let Some(engine) = &self.pdf_engine {
            args.push(format!("--pdf-engine={}", engine).into());
        }
        args
    }
}

impl Default for PandocStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderStrategy for PandocStrategy {
    fn name(&self) -> &str {
        &self.name
    }

    fn render(&self, job: &RenderJob) -> Result<Attempt> {
        let Some(program) = find_program(&self.program) else {
            return Ok(Attempt::Skipped(format!("{} not found on PATH", self.program)));
        };
        if let Some(engine) = &self.pdf_engine {
            if find_program(engine).is_none() {
                return Ok(Attempt::Skipped(format!("{} not found on PATH", engine)));
            }
        }

        log::debug!("Running {} {:?}", program.display(), self.args(job));
        let output = match Command::new(&program)
            .args(self.args(job))
            .stdin(Stdio::null())
            .output()
        {
            Ok(output) => output,
            Err(e) => return Ok(Attempt::Failed(format!("could not start: {}", e))),
        };

        if output.status.success() {
            return Ok(Attempt::Rendered {
                detail: format!("{} exited successfully", program.display()),
            });
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let stderr = stderr.trim();
        let mut reason = format!("{}", output.status);
        if !stderr.is_empty() {
            let excerpt: String = stderr.chars().take(STDERR_LIMIT).collect();
            reason.push_str(": ");
            reason.push_str(&excerpt);
        }
        Ok(Attempt::Failed(reason))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args() {
        let job = RenderJob::new("in.md", "out/doc.pdf");
        let args = PandocStrategy::new().args(&job);
        assert_eq!(
            args,
            vec!["in.md", "-o", "out/doc.pdf", "--from", "markdown+smart", "--toc"]
                .into_iter()
                .map(OsString::from)
                .collect::<Vec<_>>()
        );

        let with_engine = PandocStrategy::new().with_pdf_engine("wkhtmltopdf");
        assert_eq!(with_engine.name(), "pandoc (wkhtmltopdf)");
        assert_eq!(
            with_engine.args(&job).last(),
            Some(&OsString::from("--pdf-engine=wkhtmltopdf"))
        );
    }

    #[test]
    fn test_missing_program_is_skipped() {
        let strategy = PandocStrategy::new().with_program("docbind-no-such-program-xyz");
        let attempt = strategy.render(&RenderJob::new("in.md", "out.pdf")).unwrap();
        assert!(matches!(attempt, Attempt::Skipped(reason) if reason.contains("not found")));
    }

    #[test]
    fn test_find_program_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let tool = dir.path().join("tool");
        std::fs::write(&tool, b"").unwrap();

        assert_eq!(find_program(tool.to_str().unwrap()), Some(tool.clone()));
        assert_eq!(find_program(dir.path().join("missing").to_str().unwrap()), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_nonzero_exit_is_failure() {
        let dir = tempfile::tempdir().unwrap();
        let job = RenderJob::new(dir.path().join("in.md"), dir.path().join("out.pdf"));
        // `false` ignores its arguments and exits with status 1.
        let Some(program) = find_program("false") else {
            return;
        };
        let strategy = PandocStrategy::new().with_program(program.to_string_lossy());
        let attempt = strategy.render(&job).unwrap();
        assert!(matches!(attempt, Attempt::Failed(_)));
        assert!(!job.output.exists());
    }
}
