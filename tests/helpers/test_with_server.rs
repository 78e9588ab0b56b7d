#[macro_export]
macro_rules! test_with_server {
    ($name:ident, |$server:ident, $ctx_state:ident, $api:ident| $body:block) => {
        #[tokio::test(flavor = "multi_thread")]
        async fn $name() {
            let $api = std::sync::Arc::new($crate::helpers::MockContentApi::default());
            #[allow(unused_variables)]
            let ($server, $ctx_state) = $crate::helpers::create_test_server($api.clone());
            $body
        }
    };
}
