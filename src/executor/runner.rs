use crate::config::DeviceProfile;
use crate::error::{Result, XrError};
use crate::executor::{Command, CommandExecutor};
use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use tempfile::TempDir;
use tokio::io::AsyncWriteExt;
use tokio::process::Command as Process;

/// Device session over OpenSSH.
///
/// `open` starts a control-master connection; every query and batch is then
/// multiplexed over that one authenticated session until `close`.
pub struct SshExecutor {
    profile: DeviceProfile,
    control_dir: Option<TempDir>,
}

impl SshExecutor {
    pub fn new(profile: DeviceProfile) -> Self {
        Self {
            profile,
            control_dir: None,
        }
    }

    fn target(&self) -> String {
        format!("{}@{}", self.profile.username, self.profile.host)
    }

    fn control_path(&self) -> Option<PathBuf> {
        self.control_dir.as_ref().map(|dir| dir.path().join("ctl"))
    }

    /// `sshpass -e ssh <common options> [-S ctl]`
    fn ssh(&self) -> Process {
        let mut process = Process::new("sshpass");
        process
            .arg("-e")
            .arg("ssh")
            .env("SSHPASS", &self.profile.password)
            .arg("-p")
            .arg(self.profile.port.to_string())
            .arg("-o")
            .arg(format!("ConnectTimeout={}", self.profile.connect_timeout_secs))
            .arg("-o")
            .arg("LogLevel=ERROR")
            .kill_on_drop(true);

        if let Some(path) = self.control_path() {
            process.arg("-S").arg(path);
        }
        process
    }

    async fn run(&self, mut process: Process, stdin: Option<String>) -> Result<String> {
        process
            .stdin(if stdin.is_some() { Stdio::piped() } else { Stdio::null() })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = process
            .spawn()
            .map_err(|e| XrError::Executor(format!("failed to start ssh: {}", e)))?;

        if let (Some(input), Some(mut pipe)) = (stdin, child.stdin.take()) {
            pipe.write_all(input.as_bytes())
                .await
                .map_err(|e| XrError::Executor(e.to_string()))?;
            // closing stdin ends the remote shell
            drop(pipe);
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| XrError::Executor(e.to_string()))?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if !output.status.success() {
            tracing::debug!(status = ?output.status, %stderr, "ssh command failed");
            return Err(XrError::Executor(format!(
                "{} ({})",
                stderr.trim(),
                output.status
            )));
        }

        Ok(stdout)
    }
}

/// Configuration-mode script for one batch
fn config_script(commands: &[Command]) -> String {
    let mut script = String::from("configure\n");
    for command in commands {
        script.push_str(command.as_str());
        script.push('\n');
    }
    script.push_str("end\n");
    script
}

#[async_trait]
impl CommandExecutor for SshExecutor {
    fn name(&self) -> &str {
        &self.profile.host
    }

    async fn open(&mut self) -> Result<()> {
        let dir = tempfile::Builder::new().prefix("xr-loopback-").tempdir()?;
        self.control_dir = Some(dir);

        let mut process = self.ssh();
        process
            .arg("-M")
            .arg("-o")
            .arg("ControlPersist=yes")
            .arg("-f")
            .arg("-N")
            .arg(self.target());

        // the forked master keeps its stdio, so wait on the exit status only
        let status = process
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map_err(|e| XrError::Executor(format!("failed to start ssh: {}", e)))?;

        if !status.success() {
            self.control_dir = None;
            return Err(XrError::Executor(format!(
                "ssh connection to {} failed ({})",
                self.profile.host, status
            )));
        }

        tracing::info!(host = %self.profile.host, "ssh session opened");
        Ok(())
    }

    async fn send(&mut self, query: &str) -> Result<String> {
        tracing::debug!(host = %self.profile.host, %query, "query");

        let mut process = self.ssh();
        process.arg(self.target()).arg(query);
        self.run(process, None).await
    }

    async fn apply_batch(&mut self, commands: &[Command]) -> Result<String> {
        tracing::info!(host = %self.profile.host, commands = commands.len(), "applying batch");

        let mut process = self.ssh();
        process.arg("-T").arg(self.target());
        self.run(process, Some(config_script(commands))).await
    }

    async fn close(&mut self) -> Result<()> {
        if self.control_dir.is_none() {
            return Ok(());
        }

        let mut process = self.ssh();
        process.arg("-O").arg("exit").arg(self.target());
        let result = self.run(process, None).await.map(|_| ());

        // removes the control socket directory
        self.control_dir = None;
        tracing::info!(host = %self.profile.host, "ssh session closed");
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> DeviceProfile {
        DeviceProfile {
            host: "xr1.lab".to_string(),
            username: "admin".to_string(),
            password: "secret".to_string(),
            port: 2222,
            connect_timeout_secs: 5,
        }
    }

    #[test]
    fn test_config_script() {
        let script = config_script(&[
            Command::from("interface Loopback1"),
            Command::from("description Mgmt"),
            Command::from("commit"),
        ]);

        assert_eq!(
            script,
            "configure\ninterface Loopback1\ndescription Mgmt\ncommit\nend\n"
        );
    }

    #[test]
    fn test_ssh_arguments() {
        let executor = SshExecutor::new(profile());
        let process = executor.ssh();
        let args: Vec<String> = process
            .as_std()
            .get_args()
            .map(|a| a.to_string_lossy().to_string())
            .collect();

        assert_eq!(process.as_std().get_program(), "sshpass");
        assert_eq!(&args[..2], &["-e", "ssh"]);
        assert!(args.contains(&"2222".to_string()));
        assert!(args.contains(&"ConnectTimeout=5".to_string()));
        assert!(!args.contains(&"-S".to_string()));
        assert!(!args.iter().any(|a| a.contains("secret")));
        assert_eq!(executor.target(), "admin@xr1.lab");
    }

    #[tokio::test]
    async fn test_close_without_open_is_noop() {
        let mut executor = SshExecutor::new(profile());
        assert!(executor.close().await.is_ok());
        assert_eq!(executor.name(), "xr1.lab");
    }
}
