use reqwest::Method;

use crate::client::{Client, Transport};
use crate::error::Result;
use crate::models::Image;
use crate::util::append_query;

impl<T: Transport> Client<T> {
    pub fn list_images(&self) -> Result<Vec<Image>> {
        self.execute_json(Method::GET, "/images", None, "image list")
    }

    pub fn get_image(&self, id: i64) -> Result<Image> {
        self.execute_json(Method::GET, &format!("/images/{id}"), None, "image")
    }

    /// Filters images by species and/or owner.
    ///
    /// An empty `species` or a `user_id` of zero or less drops that filter;
    /// with neither this is the same request as [`Client::list_images`].
    pub fn search_images(&self, species: &str, user_id: i64) -> Result<Vec<Image>> {
        self.execute_json(
            Method::GET,
            &search_path(species, user_id),
            None,
            "image search results",
        )
    }
}

fn search_path(species: &str, user_id: i64) -> String {
    let mut params = Vec::new();
    if !species.is_empty() {
        params.push(("species_name", species.to_string()));
    }
    if user_id > 0 {
        params.push(("user_id", user_id.to_string()));
    }
    append_query("/images", &params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::StubTransport;
    use crate::error::Error;

    const ONE_IMAGE: &str = r#"[{"id":1,"species_name":"Oak","gps_long":1.5,"gps_lat":2.5,"image_path":"/i/1.jpg","user_id":9}]"#;

    #[test]
    fn search_query_only_carries_given_filters() {
        assert_eq!(search_path("Oak", 0), "/images?species_name=Oak");
        assert_eq!(search_path("", 5), "/images?user_id=5");
        assert_eq!(search_path("", 0), "/images");
        assert_eq!(search_path("", -3), "/images");
        assert_eq!(search_path("Red Oak", 0), "/images?species_name=Red+Oak");
        assert_eq!(
            search_path("Oak", 7),
            "/images?species_name=Oak&user_id=7"
        );
    }

    #[test]
    fn list_images_decodes_array() {
        let stub = StubTransport::default().respond(200, ONE_IMAGE);
        let images = Client::with_transport("http://x", "", &stub)
            .list_images()
            .unwrap();
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].id, 1);
        assert_eq!(images[0].species_name, "Oak");
        assert_eq!(stub.last_request().url, "http://x/images");
        assert_eq!(stub.last_request().method, Method::GET);
    }

    #[test]
    fn list_images_surfaces_not_found() {
        let stub = StubTransport::default().respond(404, "not found");
        let err = Client::with_transport("http://x", "", &stub)
            .list_images()
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("404") && msg.contains("not found"), "{msg}");
    }

    #[test]
    fn empty_array_is_not_an_error() {
        let stub = StubTransport::default().respond(200, "[]");
        let images = Client::with_transport("http://x", "", &stub)
            .search_images("Nothing", 0)
            .unwrap();
        assert!(images.is_empty());
        assert_eq!(
            stub.last_request().url,
            "http://x/images?species_name=Nothing"
        );
    }

    #[test]
    fn object_where_array_expected_is_a_decode_error() {
        let stub = StubTransport::default().respond(200, r#"{"error":"oops"}"#);
        let err = Client::with_transport("http://x", "", &stub)
            .list_images()
            .unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
    }

    #[test]
    fn get_image_puts_id_in_path() {
        let stub = StubTransport::default().respond(
            200,
            r#"{"id":42,"species_name":"Fern","gps_long":0.0,"gps_lat":0.0,"image_path":"p","user_id":1}"#,
        );
        let image = Client::with_transport("http://x", "k", &stub)
            .get_image(42)
            .unwrap();
        assert_eq!(image.id, 42);
        assert_eq!(stub.last_request().url, "http://x/images/42");
        assert_eq!(stub.last_request().header("X-API-Key"), Some("k"));
    }
}
