fn main() {
    quicksched_frontend::start();
}
