//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create a qconf command isolated to the test directory.
    ///
    /// Returns a Command configured with:
    /// - current directory, HOME and TMPDIR inside the test directory
    /// - colors off and no inherited qconf or editor settings
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("qconf").expect("failed to find qconf binary");
        cmd.current_dir(self.dir.path());
        cmd.env("HOME", self.dir.path());
        cmd.env("XDG_CONFIG_HOME", self.dir.path());
        cmd.env("TMPDIR", self.tmp());
        cmd.env("NO_COLOR", "1");
        cmd.env_remove("QCONF_CONFIG");
        cmd.env_remove("QCONF_LOG");
        cmd.env_remove("EDITOR");
        cmd.env("QCONF_UNICREDS", self.path("no-such-unicreds"));
        cmd
    }

    /// A qconf command wired to the fake store.
    #[cfg(unix)]
    pub fn store_cmd(&self) -> Command {
        let store = self.script("unicreds", super::FAKE_STORE);
        let mut cmd = self.cmd();
        cmd.env("QCONF_UNICREDS", store);
        cmd
    }

    /// Run qconf with `args` against the fake store.
    #[cfg(unix)]
    pub fn run(&self, args: &[&str]) -> Output {
        self.store_cmd()
            .args(args)
            .output()
            .expect("failed to run qconf")
    }

    /// Run `qconf -project production -edit` with `editor` and `answer` on stdin.
    #[cfg(unix)]
    pub fn edit(&self, editor: &str, answer: &str) -> Output {
        self.store_cmd()
            .args(["-project", "production", "-edit"])
            .env("EDITOR", editor)
            .write_stdin(answer)
            .output()
            .expect("failed to run qconf -edit")
    }
}
