mod support;

mod error {
    mod transport;
}

mod transport {
    mod oauth;
    mod request;
}

mod rdstation {
    mod lifecycle;
}
