//! The rule table and the predicates behind it.
//!
//! Every resource kind maps to one [`Rule`]: how reads are gated and how
//! writes are gated. The coarse check ([`permits`]) only looks at the caller;
//! the fine check ([`permits_on`]) additionally walks the relationship graph
//! from the target to the caller's scope. Both are pure.

use schoolgate_config::ScopeConfig;
use schoolgate_models::{Assessment, Attendance, Grade, Student};

use crate::graph::RelationshipGraph;
use crate::identity::{CallerKind, IdentityContext};
use crate::resolver::{CallerScope, StudentScope, TeacherScope};
use crate::resource::{Action, ResourceKind, Target};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadRule {
    /// Any authenticated caller, no scoping.
    Authenticated,
    /// Administrators see everything, others only what their scope reaches.
    Scoped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteRule {
    Administrator,
    /// Administrators, or a teacher whose scope owns the record.
    AdministratorOrOwningTeacher,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub read: ReadRule,
    pub write: WriteRule,
}

const REFERENCE_DATA: Rule = Rule {
    read: ReadRule::Authenticated,
    write: WriteRule::Administrator,
};

pub const fn rule_for(kind: ResourceKind) -> Rule {
    match kind {
        ResourceKind::School
        | ResourceKind::Department
        | ResourceKind::Subject
        | ResourceKind::Teacher
        | ResourceKind::Class
        | ResourceKind::ClassSubject
        | ResourceKind::Timetable => REFERENCE_DATA,
        ResourceKind::Student | ResourceKind::Assessment => Rule {
            read: ReadRule::Scoped,
            write: WriteRule::Administrator,
        },
        ResourceKind::Attendance | ResourceKind::Grade => Rule {
            read: ReadRule::Scoped,
            write: WriteRule::AdministratorOrOwningTeacher,
        },
    }
}

/// How a scoped record is being reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Access {
    /// A single-object check.
    Object,
    /// Membership in a filtered listing.
    Listing,
}

/// Role-only check, usable before a target exists.
pub fn permits(identity: &IdentityContext, kind: ResourceKind, action: Action) -> bool {
    let rule = rule_for(kind);
    match identity.caller_kind() {
        CallerKind::Anonymous => false,
        CallerKind::Administrator => true,
        caller => match action {
            Action::Read => true,
            Action::Write => match rule.write {
                WriteRule::Administrator => false,
                WriteRule::AdministratorOrOwningTeacher => {
                    matches!(caller, CallerKind::Teacher(_))
                }
            },
        },
    }
}

/// Role and relationship check against one record.
///
/// Denies when the target is not of `kind`.
pub fn permits_on<G: RelationshipGraph + ?Sized>(
    graph: &G,
    config: &ScopeConfig,
    identity: &IdentityContext,
    kind: ResourceKind,
    action: Action,
    target: Target<'_>,
) -> bool {
    if target.kind() != kind || !permits(identity, kind, action) {
        return false;
    }
    if identity.caller_kind() == CallerKind::Administrator {
        return true;
    }
    if action == Action::Read && rule_for(kind).read == ReadRule::Authenticated {
        return true;
    }
    let scope = CallerScope::resolve(graph, identity, config);
    scoped_target_allowed(graph, &scope, action, target, Access::Object)
}

/// Relationship predicate for a non-administrator caller.
///
/// Callers that already passed the coarse check land here; the predicate
/// decides whether the record falls inside their scope.
pub(crate) fn scoped_target_allowed<G: RelationshipGraph + ?Sized>(
    graph: &G,
    scope: &CallerScope,
    action: Action,
    target: Target<'_>,
    access: Access,
) -> bool {
    match scope {
        CallerScope::Teacher(teacher) => teacher_allowed(graph, teacher, action, target),
        CallerScope::Student(student) => {
            action == Action::Read && student_allowed(graph, student, target, access)
        }
        CallerScope::Empty => false,
    }
}

fn teacher_allowed<G: RelationshipGraph + ?Sized>(
    graph: &G,
    scope: &TeacherScope,
    action: Action,
    target: Target<'_>,
) -> bool {
    match (target, action) {
        (Target::Student(student), Action::Read) => scope.covers_class(student.current_class),
        (Target::Attendance(attendance), _) => teacher_reaches_attendance(graph, scope, attendance),
        (Target::Assessment(assessment), Action::Read) => graph
            .class_subject(assessment.class_subject_id)
            .is_some_and(|assignment| scope.owns(assignment)),
        (Target::Grade(grade), _) => teacher_owns_grade(graph, scope, grade),
        _ => false,
    }
}

/// Through the student's class, or through the teacher's own assignment
/// recorded on the attendance.
fn teacher_reaches_attendance<G: RelationshipGraph + ?Sized>(
    graph: &G,
    scope: &TeacherScope,
    attendance: &Attendance,
) -> bool {
    let via_student = graph
        .student(attendance.student_id)
        .is_some_and(|student| scope.covers_class(student.current_class));

    via_student
        || attendance
            .class_subject_id
            .and_then(|id| graph.class_subject(id))
            .is_some_and(|assignment| scope.owns(assignment))
}

fn teacher_owns_grade<G: RelationshipGraph + ?Sized>(
    graph: &G,
    scope: &TeacherScope,
    grade: &Grade,
) -> bool {
    graph
        .assessment(grade.assessment_id)
        .and_then(|assessment| graph.class_subject(assessment.class_subject_id))
        .is_some_and(|assignment| scope.owns(assignment))
}

fn student_allowed<G: RelationshipGraph + ?Sized>(
    graph: &G,
    scope: &StudentScope,
    target: Target<'_>,
    access: Access,
) -> bool {
    match target {
        Target::Student(student) => is_self(scope, student),
        Target::Grade(grade) => grade.student_id == scope.student,
        Target::Assessment(assessment) => published_in_own_class(graph, scope, assessment),
        // Own attendance is listed, never fetched by id.
        Target::Attendance(attendance) => {
            access == Access::Listing && attendance.student_id == scope.student
        }
        _ => false,
    }
}

fn is_self(scope: &StudentScope, student: &Student) -> bool {
    student.id == scope.student
}

fn published_in_own_class<G: RelationshipGraph + ?Sized>(
    graph: &G,
    scope: &StudentScope,
    assessment: &Assessment,
) -> bool {
    if !assessment.is_published {
        return false;
    }
    let Some(own_class) = scope.class else {
        return false;
    };
    graph
        .class_subject(assessment.class_subject_id)
        .is_some_and(|assignment| assignment.class_id == own_class)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::SchoolDirectory;
    use chrono::NaiveDate;
    use schoolgate_models::{
        AssessmentId, AssessmentKind, AttendanceId, AttendanceStatus, Class, ClassId,
        ClassSubject, ClassSubjectId, GradeId, SchoolId, StudentId, SubjectId, TeacherId, UserId,
    };

    const YEAR: &str = "2024-2025";

    struct World {
        directory: SchoolDirectory,
        class: Class,
        assignment: ClassSubject,
        student: Student,
        assessment: Assessment,
    }

    fn world(teacher: TeacherId) -> World {
        let mut directory = SchoolDirectory::new();
        let class = Class {
            id: ClassId::new(),
            name: "Grade 10A".to_string(),
            level: 10,
            section: "A".to_string(),
            school_id: SchoolId::new(),
            class_teacher: None,
            academic_year: YEAR.to_string(),
        };
        let assignment = ClassSubject {
            id: ClassSubjectId::new(),
            class_id: class.id,
            subject_id: SubjectId::new(),
            teacher_id: teacher,
            academic_year: YEAR.to_string(),
            periods_per_week: 5,
        };
        let student = Student {
            id: StudentId::new(),
            user_id: UserId::new(),
            student_id: "STU010".to_string(),
            admission_number: "ADM010".to_string(),
            current_class: Some(class.id),
            is_active: true,
        };
        let assessment = Assessment {
            id: AssessmentId::new(),
            name: "Algebra quiz".to_string(),
            class_subject_id: assignment.id,
            kind: AssessmentKind::Quiz,
            total_marks: 20,
            date: NaiveDate::from_ymd_opt(2024, 10, 1).unwrap(),
            is_published: false,
        };
        directory.insert_class(class.clone());
        directory.insert_class_subject(assignment.clone()).unwrap();
        directory.insert_student(student.clone());
        directory.insert_assessment(assessment.clone());
        World {
            directory,
            class,
            assignment,
            student,
            assessment,
        }
    }

    fn grade(world: &World, graded_by: TeacherId) -> Grade {
        Grade {
            id: GradeId::new(),
            student_id: world.student.id,
            assessment_id: world.assessment.id,
            marks_obtained: 15.0,
            graded_by,
        }
    }

    #[test]
    fn test_rule_table() {
        assert_eq!(rule_for(ResourceKind::Timetable), REFERENCE_DATA);
        assert_eq!(rule_for(ResourceKind::Assessment).write, WriteRule::Administrator);
        assert_eq!(
            rule_for(ResourceKind::Grade).write,
            WriteRule::AdministratorOrOwningTeacher
        );
        assert_eq!(rule_for(ResourceKind::Student).read, ReadRule::Scoped);
    }

    #[test]
    fn test_coarse_checks() {
        let teacher = IdentityContext::teacher(UserId::new(), TeacherId::new());
        let student = IdentityContext::student(UserId::new(), StudentId::new());
        let parent = IdentityContext::authenticated(UserId::new());

        for kind in ResourceKind::ALL {
            assert!(permits(&parent, kind, Action::Read));
            assert!(!permits(&parent, kind, Action::Write));
            assert!(!permits(&student, kind, Action::Write));
        }
        assert!(permits(&teacher, ResourceKind::Attendance, Action::Write));
        assert!(permits(&teacher, ResourceKind::Grade, Action::Write));
        assert!(!permits(&teacher, ResourceKind::Assessment, Action::Write));
        assert!(!permits(&teacher, ResourceKind::Class, Action::Write));
    }

    #[test]
    fn test_kind_mismatch_denied() {
        let world = world(TeacherId::new());
        let admin = IdentityContext::administrator(UserId::new());
        assert!(!permits_on(
            &world.directory,
            &ScopeConfig::all_years(),
            &admin,
            ResourceKind::Class,
            Action::Read,
            Target::Student(&world.student),
        ));
    }

    #[test]
    fn test_teacher_reads_assessment_of_own_assignment() {
        let teacher = TeacherId::new();
        let world = world(teacher);
        let config = ScopeConfig::all_years();
        let owner = IdentityContext::teacher(UserId::new(), teacher);
        let stranger = IdentityContext::teacher(UserId::new(), TeacherId::new());
        let target = Target::Assessment(&world.assessment);

        let check = |identity: &IdentityContext, action: Action| {
            permits_on(
                &world.directory,
                &config,
                identity,
                ResourceKind::Assessment,
                action,
                target,
            )
        };

        assert!(check(&owner, Action::Read));
        assert!(!check(&stranger, Action::Read));
        assert!(!check(&owner, Action::Write));
    }

    #[test]
    fn test_pinned_year_excludes_old_assignments() {
        let teacher = TeacherId::new();
        let world = world(teacher);
        let owner = IdentityContext::teacher(UserId::new(), teacher);
        let g = grade(&world, teacher);

        let pinned = ScopeConfig::only_year("2025-2026");
        let check = |config: &ScopeConfig| {
            permits_on(
                &world.directory,
                config,
                &owner,
                ResourceKind::Grade,
                Action::Write,
                Target::Grade(&g),
            )
        };
        assert!(!check(&pinned));
        let current = ScopeConfig::only_year(YEAR);
        assert!(check(&current));
    }

    #[test]
    fn test_student_attendance_not_fetched_by_id() {
        let world = world(TeacherId::new());
        let me = IdentityContext::student(UserId::new(), world.student.id);
        let attendance = Attendance {
            id: AttendanceId::new(),
            student_id: world.student.id,
            date: NaiveDate::from_ymd_opt(2024, 9, 2).unwrap(),
            status: AttendanceStatus::Present,
            class_subject_id: Some(world.assignment.id),
            marked_by: world.assignment.teacher_id,
        };
        assert!(!permits_on(
            &world.directory,
            &ScopeConfig::all_years(),
            &me,
            ResourceKind::Attendance,
            Action::Read,
            Target::Attendance(&attendance),
        ));

        let scope = CallerScope::resolve(&world.directory, &me, &ScopeConfig::all_years());
        assert!(scoped_target_allowed(
            &world.directory,
            &scope,
            Action::Read,
            Target::Attendance(&attendance),
            Access::Listing,
        ));
    }

    #[test]
    fn test_teacher_reaches_student_through_homeroom() {
        let teacher = TeacherId::new();
        let mut world = world(TeacherId::new());
        world.class.class_teacher = Some(teacher);
        world.directory.insert_class(world.class.clone());
        let homeroom_teacher = IdentityContext::teacher(UserId::new(), teacher);

        assert!(permits_on(
            &world.directory,
            &ScopeConfig::all_years(),
            &homeroom_teacher,
            ResourceKind::Student,
            Action::Read,
            Target::Student(&world.student),
        ));
        assert!(!permits_on(
            &world.directory,
            &ScopeConfig::all_years(),
            &homeroom_teacher,
            ResourceKind::Student,
            Action::Write,
            Target::Student(&world.student),
        ));
    }

    #[test]
    fn test_unlinked_caller_denied_scoped_records() {
        let world = world(TeacherId::new());
        let parent = IdentityContext::authenticated(UserId::new());
        let config = ScopeConfig::all_years();

        assert!(!permits_on(
            &world.directory,
            &config,
            &parent,
            ResourceKind::Student,
            Action::Read,
            Target::Student(&world.student),
        ));
        assert!(permits_on(
            &world.directory,
            &config,
            &parent,
            ResourceKind::Class,
            Action::Read,
            Target::Class(&world.class),
        ));
    }
}
