use crate::rpc::Post;

/// Lists a post and every reply below it, in pre-order
///
/// The post comes first, then each child's subtree in order. Walks with an
/// explicit stack, so arbitrarily deep reply chains are fine.
pub fn flatten(post: &Post) -> Vec<&Post> {
    let mut posts = Vec::new();
    let mut stack = vec![post];

    while let Some(current) = stack.pop() {
        posts.push(current);
        stack.extend(current.children.iter().rev());
    }

    posts
}
