pub mod catalog;
pub mod recipe;
pub mod relation;
pub mod shopping_list;
pub mod subscription;
pub mod user;

use crate::domain::repository::ImageStore;

/// Remove files no row references anymore. The row change is already final,
/// so a failed removal is logged and does not fail the request.
pub(crate) async fn discard_images<S: ImageStore>(images: &S, urls: &[String]) {
    for url in urls {
        if let Err(err) = images.delete(url).await {
            tracing::warn!(%url, error = %err, "failed to remove stored image");
        }
    }
}
