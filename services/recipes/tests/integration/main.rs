mod helpers;

mod catalog_test;
mod router_test;
mod subscription_test;
