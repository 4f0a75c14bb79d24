//! Shared fixtures for unit tests.

use crate::tree::{Toc, TreeNode};

/// A small book exercising affix chapters, drafts, unfinished chapters and
/// three levels of nesting.
pub(crate) fn sample_book() -> Toc {
    Toc::new(vec![
        TreeNode::chapter("Introduction", "introduction.html").affix(),
        TreeNode::chapter("Design", "design.html").in_progress(),
        TreeNode::chapter("Levels", "level/index.html").with_children(vec![
            TreeNode::chapter("Representation", "level/representation.html"),
            TreeNode::chapter("Construction", "level/construction.html"),
            TreeNode::chapter("Normalization", "level/normalization.html").in_progress(),
        ]),
        TreeNode::draft("Actions"),
        TreeNode::chapter("Solver", "solver/index.html")
            .in_progress()
            .with_children(vec![
                TreeNode::chapter("Search strategy", "solver/search_strategy.html").in_progress(),
                TreeNode::chapter("Heuristic function", "solver/heuristic_function.html")
                    .in_progress(),
                TreeNode::chapter("Optimization", "solver/optimization.html").with_children(vec![
                    TreeNode::chapter("Tunnels", "solver/tunnels.html"),
                    TreeNode::chapter("Deadlocks", "solver/deadlocks.html").in_progress(),
                    TreeNode::draft("Cut points"),
                ]),
                TreeNode::draft("Bidirectional search"),
                TreeNode::draft("Features"),
            ]),
        TreeNode::draft("Optimizer"),
        TreeNode::chapter("Resources", "resources.html"),
        TreeNode::chapter("Glossary", "glossary.html"),
    ])
}

/// `SUMMARY.md` source describing [`sample_book`].
pub(crate) const SAMPLE_SUMMARY: &str = "\
# Summary

[Introduction](introduction.md)

- [Design 🚧](design.md)
- [Levels](level/README.md)
  - [Representation](level/representation.md)
  - [Construction](./level/construction.md)
  - [Normalization 🚧](level/normalization.md)
- [Actions]()
- [Solver 🚧](solver/index.md)
  - [Search strategy 🚧](solver/search_strategy.md)
  - [Heuristic function 🚧](solver/heuristic_function.md)
  - [Optimization](solver/optimization.md)
    - [Tunnels](solver/tunnels.md)
    - [Deadlocks 🚧](solver/deadlocks.md)
    - [Cut points]()
  - [Bidirectional search]()
  - [Features]()
- [Optimizer]()
- [Resources](resources.md)
- [Glossary](glossary.md)
";

/// Static markup of [`sample_book`] with default options.
pub(crate) const SAMPLE_BOOK_HTML: &str = concat!(
    r#"<ol class="chapter"><li class="chapter-item expanded affix "><a href="introduction.html">Introduction</a></li>"#,
    r#"<li class="chapter-item expanded "><a href="design.html"><strong aria-hidden="true">1.</strong> Design 🚧</a></li>"#,
    r#"<li class="chapter-item expanded "><a href="level/index.html"><strong aria-hidden="true">2.</strong> Levels</a></li>"#,
    r#"<li><ol class="section"><li class="chapter-item expanded "><a href="level/representation.html"><strong aria-hidden="true">2.1.</strong> Representation</a></li>"#,
    r#"<li class="chapter-item expanded "><a href="level/construction.html"><strong aria-hidden="true">2.2.</strong> Construction</a></li>"#,
    r#"<li class="chapter-item expanded "><a href="level/normalization.html"><strong aria-hidden="true">2.3.</strong> Normalization 🚧</a></li>"#,
    r#"</ol></li>"#,
    r#"<li class="chapter-item expanded "><div><strong aria-hidden="true">3.</strong> Actions</div></li>"#,
    r#"<li class="chapter-item expanded "><a href="solver/index.html"><strong aria-hidden="true">4.</strong> Solver 🚧</a></li>"#,
    r#"<li><ol class="section"><li class="chapter-item expanded "><a href="solver/search_strategy.html"><strong aria-hidden="true">4.1.</strong> Search strategy 🚧</a></li>"#,
    r#"<li class="chapter-item expanded "><a href="solver/heuristic_function.html"><strong aria-hidden="true">4.2.</strong> Heuristic function 🚧</a></li>"#,
    r#"<li class="chapter-item expanded "><a href="solver/optimization.html"><strong aria-hidden="true">4.3.</strong> Optimization</a></li>"#,
    r#"<li><ol class="section"><li class="chapter-item expanded "><a href="solver/tunnels.html"><strong aria-hidden="true">4.3.1.</strong> Tunnels</a></li>"#,
    r#"<li class="chapter-item expanded "><a href="solver/deadlocks.html"><strong aria-hidden="true">4.3.2.</strong> Deadlocks 🚧</a></li>"#,
    r#"<li class="chapter-item expanded "><div><strong aria-hidden="true">4.3.3.</strong> Cut points</div></li>"#,
    r#"</ol></li>"#,
    r#"<li class="chapter-item expanded "><div><strong aria-hidden="true">4.4.</strong> Bidirectional search</div></li>"#,
    r#"<li class="chapter-item expanded "><div><strong aria-hidden="true">4.5.</strong> Features</div></li>"#,
    r#"</ol></li>"#,
    r#"<li class="chapter-item expanded "><div><strong aria-hidden="true">5.</strong> Optimizer</div></li>"#,
    r#"<li class="chapter-item expanded "><a href="resources.html"><strong aria-hidden="true">6.</strong> Resources</a></li>"#,
    r#"<li class="chapter-item expanded "><a href="glossary.html"><strong aria-hidden="true">7.</strong> Glossary</a></li>"#,
    r#"</ol>"#,
);
