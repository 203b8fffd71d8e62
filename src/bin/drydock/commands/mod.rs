//! Command implementations

pub mod all;
pub mod build;
pub mod clean;
pub mod completions;
pub mod configure;
pub mod run;
pub mod status;

use std::sync::Arc;

use anyhow::Result;

use crate::cli::GlobalArgs;
use drydock::builder::{BuildContext, BuildOverrides, ProcessRunner};
use drydock::core::Profile;
use drydock::ops::Orchestrator;
use drydock::util::fs::absolutize;
use drydock::util::{GlobalContext, Shell};

/// Everything a stage command needs: where the project is and how to talk
/// to the user.
pub struct Session {
    pub shell: Arc<Shell>,
    pub ctx: BuildContext,
}

impl Session {
    pub fn new(
        global: &GlobalArgs,
        shell: Arc<Shell>,
        profile: Option<Profile>,
        jobs: Option<usize>,
    ) -> Result<Self> {
        let gctx = GlobalContext::new()?;

        let source_dir = match &global.source_dir {
            Some(dir) => absolutize(gctx.cwd(), dir),
            None => gctx.find_project_root(),
        };
        let config = gctx.load_config(&source_dir)?;

        let overrides = BuildOverrides {
            build_root: global.build_root.as_deref().map(|p| absolutize(gctx.cwd(), p)),
            profile,
            jobs,
        };
        let ctx = BuildContext::new(&source_dir, &config, &overrides)?;

        tracing::debug!(
            "project {} (build root {}, profile {})",
            ctx.source_dir.display(),
            ctx.build_root.path().display(),
            ctx.profile
        );

        Ok(Session { shell, ctx })
    }

    /// An orchestrator that runs real processes.
    pub fn orchestrator(&self) -> Orchestrator<'_, ProcessRunner> {
        Orchestrator::new(
            &self.ctx,
            ProcessRunner::new(Arc::clone(&self.shell)),
            Arc::clone(&self.shell),
        )
    }
}
