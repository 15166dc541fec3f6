//! Include-path virtualization.
//! Rewrites textual include directives to route through a virtual root
//! and binds that root to a real folder in the engine config. Purely
//! textual; no template parsing happens here.

use std::path::Path;

use crate::config::EngineConfig;

/// Virtual prefix include paths are rerouted under.
pub const INCLUDES_ROOT: &str = "/@includes/";

const INCLUDE_OPEN: &str = "<#include \"";

/// Rewrites every include-directive opening so subsequent path segments
/// are rooted under [`INCLUDES_ROOT`]. All other text is untouched.
pub fn patch_source(source: &str) -> String {
    source.replace(INCLUDE_OPEN, &format!("{}{}", INCLUDE_OPEN, INCLUDES_ROOT))
}

/// Binds the virtual includes root to `includes_folder` in the engine
/// config. Path separators are normalized to the forward-slash form the
/// engine expects.
pub fn patch_config(config: &mut EngineConfig, includes_folder: &Path) {
    let folder = includes_folder.display().to_string().replace('\\', "/");
    config.insert(
        "freemarkerLinks".to_string(),
        format!("{{includes: {}}}", folder),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_source_rewrites_every_include() {
        let source = "<#include \"a.ftl\">\nbody\n<#include \"b.ftl\">";
        assert_eq!(
            patch_source(source),
            "<#include \"/@includes/a.ftl\">\nbody\n<#include \"/@includes/b.ftl\">"
        );
    }

    #[test]
    fn test_patch_source_leaves_other_text_untouched() {
        let source = "Hello ${name} <#if x>y</#if>";
        assert_eq!(patch_source(source), source);
    }

    #[test]
    fn test_patch_config_normalizes_separators() {
        let mut config = EngineConfig::new();
        patch_config(&mut config, Path::new("C:\\templates\\partials"));
        assert_eq!(
            config.get("freemarkerLinks").map(String::as_str),
            Some("{includes: C:/templates/partials}")
        );
    }
}
