pub(crate) mod post_gateway;
