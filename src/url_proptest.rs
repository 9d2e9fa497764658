//! Property-based tests for URL parsing and serialization.
//!
//! These tests use proptest to generate canonical Git Fusion URLs and verify
//! that invariants hold for all of them.

#[cfg(test)]
mod proptest_tests {
    use crate::command::Command;
    use crate::url::{GitFusionUrl, Scheme};
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    struct Parts {
        scheme: &'static str,
        user: Option<String>,
        password: Option<String>,
        host: String,
        port: Option<u16>,
        command: Option<Command>,
        repo: Option<String>,
        extra: Option<String>,
    }

    impl Parts {
        fn is_scp(&self) -> bool {
            self.scheme.starts_with("scp")
        }

        fn render(&self) -> String {
            let mut out = if self.is_scp() {
                format!("{}@{}", self.user.as_deref().unwrap_or("git"), self.host)
            } else {
                let mut base = format!("{}://", self.scheme);
                if let Some(user) = &self.user {
                    base.push_str(user);
                    if let Some(password) = &self.password {
                        base.push(':');
                        base.push_str(password);
                    }
                    base.push('@');
                }
                base.push_str(&self.host);
                if let Some(port) = self.port {
                    base.push_str(&format!(":{}", port));
                }
                base
            };

            if self.command.is_none() && self.repo.is_none() {
                return out;
            }
            out.push(if self.scheme == "scp-colon" { ':' } else { '/' });
            if let Some(command) = self.command {
                out.push('@');
                out.push_str(command.as_str());
                if self.repo.is_some() {
                    out.push('@');
                }
            }
            if let Some(repo) = &self.repo {
                out.push_str(repo);
            }
            if let Some(extra) = &self.extra {
                out.push('@');
                out.push_str(extra);
            }
            out
        }
    }

    fn command_strategy() -> impl Strategy<Value = Option<Command>> {
        prop::option::of(prop::sample::select(Command::ALL.to_vec()))
    }

    prop_compose! {
        fn parts_strategy()(
            scheme in prop::sample::select(vec!["http", "https", "ssh", "scp-colon", "scp-slash"]),
            user in prop::option::of("[a-z][a-z0-9]{0,7}"),
            password in prop::option::of("[a-z0-9]{1,8}"),
            host in "[a-z]{1,10}(\\.[a-z]{2,5})?",
            port in prop::option::of(1025u16..65535),
            command in command_strategy(),
            repo in prop::option::of("[a-z0-9_-]{1,8}(/[a-z0-9_-]{1,8}){0,2}"),
            extra in prop::option::of("[a-z0-9@]{0,8}"),
        ) -> Parts {
            let scp = scheme.starts_with("scp");
            let extra = if command.is_some() && repo.is_some() { extra } else { None };
            Parts {
                scheme,
                user: if scp { Some(user.unwrap_or_else(|| "git".to_string())) } else { user },
                password: if scp { None } else { password },
                host,
                port: if scp { None } else { port },
                command,
                repo,
                extra,
            }
        }
    }

    proptest! {
        /// Property: parsing then serializing without stripping reproduces
        /// the source string
        #[test]
        fn round_trip_is_lossless(parts in parts_strategy()) {
            let raw = parts.render();
            let mut url = GitFusionUrl::parse(&raw).unwrap();
            url.set_strip_password(false);
            prop_assert_eq!(url.to_url_string().unwrap(), raw);
        }

        /// Property: parsed fields match the generated ones
        #[test]
        fn parse_recovers_fields(parts in parts_strategy()) {
            let url = GitFusionUrl::parse(&parts.render()).unwrap();
            prop_assert_eq!(url.command(), parts.command);
            prop_assert_eq!(url.repo(), parts.repo.as_deref());
            prop_assert_eq!(url.extra(), parts.extra.as_deref());
            prop_assert_eq!(url.host().unwrap(), parts.host.clone());
        }

        /// Property: the default serialization never carries a password
        #[test]
        fn stripped_output_has_no_password(parts in parts_strategy()) {
            let url = GitFusionUrl::parse(&parts.render()).unwrap();
            let serialized = url.to_url_string().unwrap();
            if let (Some(user), Some(password)) = (&parts.user, &parts.password) {
                let userinfo = format!("{}:{}@", user, password);
                prop_assert!(
                    !serialized.contains(&userinfo),
                    "password leaked in {}",
                    serialized
                );
            }
            prop_assert_eq!(url.embedded_password().unwrap(), if parts.is_scp() {
                None
            } else {
                parts.user.as_ref().and(parts.password.clone())
            });
        }

        /// Property: scp-style `:` and `/` separators parse identically apart
        /// from the recorded delimiter
        #[test]
        fn scp_delimiters_are_equivalent(
            user in "[a-z][a-z0-9]{0,7}",
            host in "[a-z]{1,10}",
            repo in "[a-z0-9_-]{1,8}(/[a-z0-9_-]{1,8}){0,2}",
        ) {
            let colon = GitFusionUrl::parse(&format!("{}@{}:{}", user, host, repo)).unwrap();
            let slash = GitFusionUrl::parse(&format!("{}@{}/{}", user, host, repo)).unwrap();

            prop_assert_eq!(colon.scheme(), Scheme::Scp);
            prop_assert_eq!(colon.base(), slash.base());
            prop_assert_eq!(colon.repo(), slash.repo());
            prop_assert_eq!(colon.recorded_delimiter(), Some(':'));
            prop_assert_eq!(slash.recorded_delimiter(), Some('/'));
        }

        /// Property: only the five known commands are accepted
        #[test]
        fn unknown_commands_are_rejected(name in "[a-z]{1,8}") {
            let mut url = GitFusionUrl::new(Scheme::Https, "https://gf.example.com");
            let known = Command::ALL.iter().any(|c| c.as_str() == name);
            prop_assert_eq!(url.set_command(Some(&name)).is_ok(), known);
        }
    }
}
